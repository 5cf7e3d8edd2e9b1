//! Events consumed by the form controller
//!
//! Everything that can happen to a form arrives through this one enum:
//! user edits from the key handler, timer expirations from the timer
//! service, and the transport's completion. Processing order is channel
//! order.

use crate::transport::SubmitError;

/// A single external event for [`FormController`](super::FormController)
#[derive(Debug, Clone)]
pub enum FormEvent {
    /// The user changed a field's value; `value` is the full new value
    ValueChanged { field_id: String, value: String },
    /// Focus left a field
    FieldBlurred { field_id: String },
    /// The user asked to submit the form
    SubmitRequested,
    /// A debounce delay for an email field ran out. Stale sequence
    /// numbers are ignored (the field changed again in the meantime).
    DebounceElapsed { field_id: String, seq: u64 },
    /// The transport finished delivering a submission
    SubmitCompleted { result: Result<(), SubmitError> },
    /// The status message's display window ran out
    MessageExpired { seq: u64 },
}
