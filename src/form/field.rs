//! Form field declarations and live state

use super::validator::Verdict;

/// Kind of input a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    /// Anything without kind-specific validation (textarea, select)
    Other,
}

/// Static declaration of a single form field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub kind: FieldKind,
    pub multiline: bool,
}

impl FieldSpec {
    /// Declare a single-line text field
    pub fn text(id: &str, label: &str, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required,
            kind: FieldKind::Text,
            multiline: false,
        }
    }

    /// Declare an email field
    pub fn email(id: &str, label: &str, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required,
            kind: FieldKind::Email,
            multiline: false,
        }
    }

    /// Declare a multiline free-text field
    pub fn multiline(id: &str, label: &str, required: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required,
            kind: FieldKind::Other,
            multiline: true,
        }
    }
}

/// Validation state of a field's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    /// Not validated since the last edit
    #[default]
    Unknown,
    Valid,
    Invalid,
}

/// A form field: its declaration plus the value the user has entered
#[derive(Debug, Clone)]
pub struct Field {
    spec: FieldSpec,
    value: String,
    validity: Validity,
    error_text: String,
}

impl Field {
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            value: String::new(),
            validity: Validity::Unknown,
            error_text: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn kind(&self) -> FieldKind {
        self.spec.kind
    }

    pub fn is_multiline(&self) -> bool {
        self.spec.multiline
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// Error text for the current value; empty unless invalid
    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    /// Replace the value. Any previous verdict no longer applies, so
    /// validity drops back to unknown.
    pub fn set_value(&mut self, value: String) {
        self.value = value;
        self.validity = Validity::Unknown;
        self.error_text.clear();
    }

    /// Clear the value and reset validation state
    pub fn clear(&mut self) {
        self.set_value(String::new());
    }

    /// Record a validation verdict for the current value
    pub fn apply_verdict(&mut self, verdict: &Verdict) {
        if verdict.valid {
            self.validity = Validity::Valid;
            self.error_text.clear();
        } else {
            self.validity = Validity::Invalid;
            self.error_text = verdict.error_text.clone();
        }
    }
}
