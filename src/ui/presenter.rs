//! Presenter implementation backing the terminal UI
//!
//! Records what the controller reports and answers rendering queries;
//! it never feeds anything back into the controller.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::form::{MessageKind, Presenter, Validity};

/// Submit button label while a submission is in flight
pub const SENDING_LABEL: &str = "Sending...";
/// Submit button label when idle
pub const SUBMIT_LABEL: &str = "Send Message";

/// How long the invalid-submit shake plays
const SHAKE_DURATION: Duration = Duration::from_millis(500);
/// Peak horizontal shake offset, in columns
const SHAKE_COLUMNS: f32 = 10.0;

/// What the controller last reported for one field
#[derive(Debug, Clone, Default)]
pub struct FieldDisplay {
    pub validity: Validity,
    pub error_text: String,
}

/// View model the terminal front-end renders from
#[derive(Default)]
pub struct TuiPresenter {
    fields: HashMap<String, FieldDisplay>,
    banner: Option<(String, MessageKind)>,
    busy: bool,
    shake_started: Option<Instant>,
}

impl TuiPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display state for a field; defaults to unknown/no error before
    /// the controller has reported anything.
    pub fn field(&self, field_id: &str) -> FieldDisplay {
        self.fields.get(field_id).cloned().unwrap_or_default()
    }

    /// The banner message, if one is showing
    pub fn banner(&self) -> Option<(&str, MessageKind)> {
        self.banner
            .as_ref()
            .map(|(text, kind)| (text.as_str(), *kind))
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Current horizontal shake offset in columns; 0 when idle.
    /// The form swings out and back once, eased at both ends.
    pub fn shake_offset(&self) -> u16 {
        let Some(started) = self.shake_started else {
            return 0;
        };
        let progress = started.elapsed().as_secs_f32() / SHAKE_DURATION.as_secs_f32();
        if progress >= 1.0 {
            return 0;
        }
        let swing = 1.0 - (2.0 * progress - 1.0).abs();
        (SHAKE_COLUMNS * simple_easing::sine_in_out(swing)).round() as u16
    }

    /// Whether the shake animation is still playing
    pub fn is_shaking(&self) -> bool {
        self.shake_started
            .is_some_and(|started| started.elapsed() < SHAKE_DURATION)
    }
}

impl Presenter for TuiPresenter {
    fn set_field_validity(&mut self, field_id: &str, validity: Validity, error_text: &str) {
        self.fields.insert(
            field_id.to_string(),
            FieldDisplay {
                validity,
                error_text: error_text.to_string(),
            },
        );
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.banner = Some((text.to_string(), kind));
    }

    fn hide_message(&mut self) {
        self.banner = None;
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn shake(&mut self) {
        self.shake_started = Some(Instant::now());
    }
}
