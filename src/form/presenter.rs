//! Presentation contract the controller drives
//!
//! The controller never reads presentation state; it only reports what
//! changed. Mockable so controller tests can assert on the exact calls.

use super::field::Validity;
use super::message::MessageKind;

/// Rendering capabilities the form controller needs from a front-end
#[cfg_attr(test, mockall::automock)]
pub trait Presenter {
    /// Report a field's validation state. `error_text` is empty unless
    /// the field is invalid; `Validity::Unknown` means any previous
    /// state should be cleared.
    fn set_field_validity(&mut self, field_id: &str, validity: Validity, error_text: &str);

    /// Show the status banner
    fn show_message(&mut self, text: &str, kind: MessageKind);

    /// Hide the status banner
    fn hide_message(&mut self);

    /// Toggle the busy indicator on the submit affordance
    fn set_busy(&mut self, busy: bool);

    /// Nudge the user: submission was requested with invalid fields
    fn shake(&mut self);
}
