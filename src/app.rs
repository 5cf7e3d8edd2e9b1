//! Application state and core logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::config::AppConfig;
use crate::form::{FieldSpec, FormController, FormEvent};
use crate::timer::TokioTimers;
use crate::transport::{SimulatedTransport, DEFAULT_LATENCY};
use crate::ui::TuiPresenter;

/// Controller type the app drives
pub type AppController = FormController<TuiPresenter, TokioTimers>;

/// Main application struct
pub struct App {
    /// Controller for the contact form
    pub controller: AppController,
    /// Outcomes queued by timers and the transport
    events: UnboundedReceiver<FormEvent>,
    /// Focus index: one slot per field, then the submit button
    focus: usize,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &AppConfig) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        let debounce = config
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(AppController::DEFAULT_DEBOUNCE);
        let latency = config
            .transport_latency_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LATENCY);
        let transport = SimulatedTransport::new(latency, config.transport_failure.clone());

        let controller = FormController::new(
            contact_fields(),
            TuiPresenter::new(),
            Arc::new(transport),
            TokioTimers::new(tx.clone()),
            tx,
            debounce,
        )?;

        Ok(Self {
            controller,
            events: rx,
            focus: 0,
            quit: false,
        })
    }

    /// Apply everything queued by timers and the transport since the
    /// last frame
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.controller.handle_event(event);
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Enter => self.handle_enter(),
            KeyCode::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.edit_focused(|value| value.push(c));
            }
            _ => {}
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The field currently holding focus, if the submit button is not
    pub fn focused_field_index(&self) -> Option<usize> {
        (self.focus < self.field_count()).then_some(self.focus)
    }

    /// Whether the submit button holds focus
    pub fn is_button_focused(&self) -> bool {
        self.focus == self.field_count()
    }

    pub fn presenter(&self) -> &TuiPresenter {
        self.controller.presenter()
    }

    /// Move focus to the next slot (wraps around)
    pub fn next_field(&mut self) {
        self.blur_focused();
        self.focus = (self.focus + 1) % self.focus_count();
    }

    /// Move focus to the previous slot (wraps around)
    pub fn prev_field(&mut self) {
        self.blur_focused();
        if self.focus == 0 {
            self.focus = self.focus_count() - 1;
        } else {
            self.focus -= 1;
        }
    }

    fn handle_enter(&mut self) {
        if self.is_button_focused() {
            self.controller.handle_event(FormEvent::SubmitRequested);
        } else if let Some(idx) = self.focused_field_index() {
            if self.controller.fields()[idx].is_multiline() {
                self.edit_focused(|value| value.push('\n'));
            } else {
                self.next_field();
            }
        }
    }

    /// Leaving a field counts as a blur
    fn blur_focused(&mut self) {
        if let Some(idx) = self.focused_field_index() {
            let field_id = self.controller.fields()[idx].id().to_string();
            self.controller
                .handle_event(FormEvent::FieldBlurred { field_id });
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(idx) = self.focused_field_index() else {
            return;
        };
        let field = &self.controller.fields()[idx];
        let field_id = field.id().to_string();
        let mut value = field.value().to_string();
        edit(&mut value);
        self.controller
            .handle_event(FormEvent::ValueChanged { field_id, value });
    }

    fn field_count(&self) -> usize {
        self.controller.fields().len()
    }

    fn focus_count(&self) -> usize {
        self.field_count() + 1
    }
}

/// The contact form's fields, in display order
fn contact_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("name", "Name", true),
        FieldSpec::email("email", "Email", true),
        FieldSpec::text("subject", "Subject", false),
        FieldSpec::multiline("message", "Message", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{SubmissionStatus, Validity};
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(&AppConfig::default()).expect("default app should construct")
    }

    mod focus_tests {
        use super::*;

        #[tokio::test]
        async fn test_new_app_focuses_first_field() {
            let app = test_app();
            assert_eq!(app.focused_field_index(), Some(0));
            assert!(!app.is_button_focused());
        }

        #[tokio::test]
        async fn test_next_field_reaches_button_then_wraps() {
            let mut app = test_app();
            for _ in 0..4 {
                app.next_field();
            }
            assert!(app.is_button_focused());
            app.next_field();
            assert_eq!(app.focused_field_index(), Some(0));
        }

        #[tokio::test]
        async fn test_prev_field_wraps_to_button() {
            let mut app = test_app();
            app.prev_field();
            assert!(app.is_button_focused());
        }

        #[tokio::test]
        async fn test_leaving_required_field_marks_it_invalid() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Tab));
            let name = app.controller.field("name").unwrap();
            assert_eq!(name.validity(), Validity::Invalid);
        }
    }

    mod editing_tests {
        use super::*;

        #[tokio::test]
        async fn test_typing_fills_focused_field() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Char('A')));
            app.handle_key(key(KeyCode::Char('d')));
            app.handle_key(key(KeyCode::Char('a')));
            assert_eq!(app.controller.field("name").unwrap().value(), "Ada");
        }

        #[tokio::test]
        async fn test_backspace_removes_last_char() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Char('h')));
            app.handle_key(key(KeyCode::Char('i')));
            app.handle_key(key(KeyCode::Backspace));
            assert_eq!(app.controller.field("name").unwrap().value(), "h");
        }

        #[tokio::test]
        async fn test_control_chars_are_not_typed() {
            let mut app = test_app();
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert_eq!(app.controller.field("name").unwrap().value(), "");
        }

        #[tokio::test]
        async fn test_enter_on_single_line_field_advances_focus() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.focused_field_index(), Some(1));
        }

        #[tokio::test]
        async fn test_enter_on_multiline_field_inserts_newline() {
            let mut app = test_app();
            // Focus the message field (index 3)
            for _ in 0..3 {
                app.next_field();
            }
            app.handle_key(key(KeyCode::Char('h')));
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Char('i')));
            assert_eq!(app.controller.field("message").unwrap().value(), "h\ni");
        }
    }

    mod submit_tests {
        use super::*;

        #[tokio::test]
        async fn test_enter_on_button_with_empty_form_stays_idle() {
            let mut app = test_app();
            app.prev_field(); // wrap straight to the button
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.controller.status(), SubmissionStatus::Idle);
            assert!(app.presenter().is_shaking());
        }
    }

    mod quit_tests {
        use super::*;

        #[tokio::test]
        async fn test_esc_quits() {
            let mut app = test_app();
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }
    }
}
