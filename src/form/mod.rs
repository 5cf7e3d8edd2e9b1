//! Form domain layer
//!
//! Field declarations, validation rules, and the submission state
//! machine, decoupled from rendering behind the [`Presenter`] trait.

mod controller;
mod events;
mod field;
mod message;
mod presenter;
mod validator;

pub use controller::{FormController, FormError, SubmissionStatus, SUCCESS_TEXT};
pub use events::FormEvent;
pub use field::{Field, FieldKind, FieldSpec, Validity};
pub use message::{MessageKind, StatusMessage};
pub use presenter::Presenter;
pub use validator::{validate, Verdict, EMAIL_ERROR, REQUIRED_ERROR};

#[cfg(test)]
pub use presenter::MockPresenter;
