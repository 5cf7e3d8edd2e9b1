//! Trait abstraction for submission delivery to enable mocking in tests

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// A failed delivery, with the reason the user should see
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SubmitError {
    pub reason: String,
}

impl SubmitError {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

/// Trait for delivering a completed form, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver the submitted values, keyed by field id. Failure is
    /// recoverable; the user may resubmit.
    async fn submit(&self, payload: HashMap<String, String>) -> Result<(), SubmitError>;
}
