//! Form submission state machine
//!
//! One controller owns one form: its fields, the submission status,
//! and the status banner. All mutation happens through
//! [`FormController::handle_event`] on a single control flow; timers
//! and the transport deliver their outcomes back through the
//! controller's event channel. Dropping the controller cancels every
//! pending debounce and message-expiry timer; an in-flight transport
//! call cannot be canceled, its completion is simply ignored.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::timer::{TimerHandle, TimerService};
use crate::transport::Transport;

use super::events::FormEvent;
use super::field::{Field, FieldKind, FieldSpec, Validity};
use super::message::{MessageKind, StatusMessage};
use super::presenter::Presenter;
use super::validator;

/// Banner text after a successful submission
pub const SUCCESS_TEXT: &str =
    "Thank you for your message! We'll get back to you within 24 hours.";

/// Where the submission workflow currently stands.
///
/// `Validating`, `Succeeded` and `Failed` are transient: they only
/// exist inside a single event dispatch. Between events the status is
/// either `Idle` or `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Rejected form declaration. These are precondition violations and
/// are reported at construction time, never mid-flight.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("field declared with an empty id")]
    EmptyFieldId,
    #[error("duplicate field id: {0}")]
    DuplicateFieldId(String),
}

/// Debounce bookkeeping for one email field. Events carrying a stale
/// sequence number are ignored, so the last edit always wins even if
/// an aborted timer managed to deliver.
#[derive(Default)]
struct Debounce {
    seq: u64,
    pending: Option<TimerHandle>,
}

/// Controller for a single form's validation and submission lifecycle
pub struct FormController<P: Presenter, T: TimerService> {
    fields: Vec<Field>,
    status: SubmissionStatus,
    #[allow(dead_code)]
    message: Option<StatusMessage>,
    message_seq: u64,
    message_timer: Option<TimerHandle>,
    debounces: HashMap<String, Debounce>,
    presenter: P,
    transport: Arc<dyn Transport>,
    timers: T,
    events: UnboundedSender<FormEvent>,
    debounce_delay: Duration,
}

impl<P: Presenter, T: TimerService> FormController<P, T> {
    /// Display window of a status message
    pub const MESSAGE_TTL: Duration = Duration::from_secs(5);
    /// Delay before an edited email field is re-validated
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

    /// Create a controller for the given field declarations.
    ///
    /// Fields keep their declaration order. Declarations with an empty
    /// or duplicate id are rejected here rather than mis-validated
    /// later.
    pub fn new(
        specs: Vec<FieldSpec>,
        presenter: P,
        transport: Arc<dyn Transport>,
        timers: T,
        events: UnboundedSender<FormEvent>,
        debounce_delay: Duration,
    ) -> Result<Self, FormError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if spec.id.is_empty() {
                return Err(FormError::EmptyFieldId);
            }
            if !seen.insert(spec.id.clone()) {
                return Err(FormError::DuplicateFieldId(spec.id.clone()));
            }
        }

        Ok(Self {
            fields: specs.into_iter().map(Field::new).collect(),
            status: SubmissionStatus::Idle,
            message: None,
            message_seq: 0,
            message_timer: None,
            debounces: HashMap::new(),
            presenter,
            transport,
            timers,
            events,
            debounce_delay,
        })
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by id
    #[allow(dead_code)]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id() == id)
    }

    #[allow(dead_code)]
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// The live status banner, if one is showing
    #[allow(dead_code)]
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Dispatch one event. Never panics and never returns an error;
    /// every outcome is a state transition or a presenter call.
    pub fn handle_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::ValueChanged { field_id, value } => self.on_value_changed(&field_id, value),
            FormEvent::FieldBlurred { field_id } => self.on_field_blurred(&field_id),
            FormEvent::SubmitRequested => self.on_submit_requested(),
            FormEvent::DebounceElapsed { field_id, seq } => self.on_debounce_elapsed(&field_id, seq),
            FormEvent::SubmitCompleted { result } => self.on_submit_completed(result),
            FormEvent::MessageExpired { seq } => self.on_message_expired(seq),
        }
    }

    fn on_value_changed(&mut self, field_id: &str, value: String) {
        let Some(idx) = self.field_index(field_id) else {
            tracing::warn!("edit for unknown field {field_id}");
            return;
        };

        self.fields[idx].set_value(value);
        self.presenter
            .set_field_validity(field_id, Validity::Unknown, "");

        if self.fields[idx].kind() == FieldKind::Email {
            // Re-validate once the input pauses; an earlier pending
            // check for this field is superseded.
            let seq = self.bump_debounce(field_id);
            let timer = self.timers.schedule(
                self.debounce_delay,
                FormEvent::DebounceElapsed {
                    field_id: field_id.to_string(),
                    seq,
                },
            );
            if let Some(entry) = self.debounces.get_mut(field_id) {
                entry.pending = Some(timer);
            }
        } else {
            self.validate_field(idx);
        }
    }

    fn on_field_blurred(&mut self, field_id: &str) {
        let Some(idx) = self.field_index(field_id) else {
            tracing::warn!("blur for unknown field {field_id}");
            return;
        };

        // Blur settles the field immediately; a pending debounce check
        // would be redundant.
        self.bump_debounce(field_id);
        self.validate_field(idx);
    }

    fn on_debounce_elapsed(&mut self, field_id: &str, seq: u64) {
        let current = self.debounces.get(field_id).map(|d| d.seq).unwrap_or(0);
        if seq != current {
            tracing::debug!("stale debounce for {field_id} (seq {seq}, current {current})");
            return;
        }

        if let Some(entry) = self.debounces.get_mut(field_id) {
            entry.pending = None;
        }
        if let Some(idx) = self.field_index(field_id) {
            self.validate_field(idx);
        }
    }

    fn on_submit_requested(&mut self) {
        if self.status != SubmissionStatus::Idle {
            tracing::debug!("ignoring submit while {:?}", self.status);
            return;
        }

        self.status = SubmissionStatus::Validating;
        let mut all_valid = true;
        for idx in 0..self.fields.len() {
            if !self.validate_field(idx) {
                all_valid = false;
            }
        }

        if !all_valid {
            tracing::info!("submission blocked by invalid fields");
            self.presenter.shake();
            self.status = SubmissionStatus::Idle;
            return;
        }

        // Every field just validated; any still-pending debounce check
        // would fire against cleared fields after a success.
        self.cancel_pending_debounces();

        self.status = SubmissionStatus::Submitting;
        self.presenter.set_busy(true);

        let payload: HashMap<String, String> = self
            .fields
            .iter()
            .map(|f| (f.id().to_string(), f.value().to_string()))
            .collect();
        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = transport.submit(payload).await;
            let _ = events.send(FormEvent::SubmitCompleted { result });
        });
        tracing::info!("submission dispatched");
    }

    fn on_submit_completed(&mut self, result: Result<(), crate::transport::SubmitError>) {
        if self.status != SubmissionStatus::Submitting {
            tracing::debug!("ignoring transport completion while {:?}", self.status);
            return;
        }

        match result {
            Ok(()) => {
                self.status = SubmissionStatus::Succeeded;
                tracing::info!("submission delivered");
                self.show_message(SUCCESS_TEXT, MessageKind::Success);
                for idx in 0..self.fields.len() {
                    self.fields[idx].clear();
                    let field = &self.fields[idx];
                    self.presenter
                        .set_field_validity(field.id(), Validity::Unknown, "");
                }
            }
            Err(err) => {
                self.status = SubmissionStatus::Failed;
                tracing::warn!("submission failed: {err}");
                self.show_message(&err.reason, MessageKind::Error);
            }
        }

        self.presenter.set_busy(false);
        self.status = SubmissionStatus::Idle;
    }

    fn on_message_expired(&mut self, seq: u64) {
        if seq != self.message_seq {
            tracing::debug!("stale message expiry (seq {seq}, current {})", self.message_seq);
            return;
        }

        self.message = None;
        self.message_timer = None;
        self.presenter.hide_message();
    }

    /// Validate one field, record the verdict, and report it. Returns
    /// whether the field is valid.
    fn validate_field(&mut self, idx: usize) -> bool {
        let verdict = validator::validate(self.fields[idx].spec(), self.fields[idx].value());
        self.fields[idx].apply_verdict(&verdict);
        let field = &self.fields[idx];
        self.presenter
            .set_field_validity(field.id(), field.validity(), field.error_text());
        verdict.valid
    }

    /// Invalidate any in-flight debounce for `field_id` and return the
    /// new current sequence number.
    fn bump_debounce(&mut self, field_id: &str) -> u64 {
        let entry = self.debounces.entry(field_id.to_string()).or_default();
        entry.seq += 1;
        if let Some(timer) = entry.pending.take() {
            timer.cancel();
        }
        entry.seq
    }

    fn cancel_pending_debounces(&mut self) {
        for entry in self.debounces.values_mut() {
            if let Some(timer) = entry.pending.take() {
                entry.seq += 1;
                timer.cancel();
            }
        }
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.message_seq += 1;
        self.message = Some(StatusMessage::new(text, kind, Self::MESSAGE_TTL));
        self.presenter.show_message(text, kind);
        // Replacing the handle aborts the previous message's timer, so
        // at most one expiry is ever in flight.
        self.message_timer = Some(self.timers.schedule(
            Self::MESSAGE_TTL,
            FormEvent::MessageExpired {
                seq: self.message_seq,
            },
        ));
    }

    fn field_index(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id() == field_id)
    }
}
