//! Simulated transport standing in for a real backend
//!
//! Sleeps a configurable latency and reports success, or a configured
//! failure reason. Swapping in a real network client only requires
//! another [`Transport`] implementation.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::traits::{SubmitError, Transport};

/// Default simulated delivery latency
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// In-process transport that pretends to deliver submissions
pub struct SimulatedTransport {
    latency: Duration,
    fail_with: Option<String>,
}

impl SimulatedTransport {
    pub fn new(latency: Duration, fail_with: Option<String>) -> Self {
        Self { latency, fail_with }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY, None)
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn submit(&self, payload: HashMap<String, String>) -> Result<(), SubmitError> {
        tracing::debug!("simulating delivery of {} fields", payload.len());
        tokio::time::sleep(self.latency).await;

        match &self.fail_with {
            Some(reason) => Err(SubmitError::new(reason)),
            None => Ok(()),
        }
    }
}
