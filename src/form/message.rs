//! Transient status messages shown after a submission attempt

use std::time::{Duration, Instant};

/// Visual category of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// A banner message with a fixed display window
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
    pub expires_at: Instant,
}

impl StatusMessage {
    pub fn new(text: &str, kind: MessageKind, ttl: Duration) -> Self {
        Self {
            text: text.to_string(),
            kind,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Whether the display window has passed
    #[allow(dead_code)]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}
