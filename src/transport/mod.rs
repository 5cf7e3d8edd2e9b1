//! Transport module for delivering form submissions

mod simulated;
mod traits;

pub use simulated::{SimulatedTransport, DEFAULT_LATENCY};
pub use traits::{SubmitError, Transport};

#[cfg(test)]
pub use traits::MockTransport;
