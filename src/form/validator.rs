//! Field validation rules
//!
//! Pure functions from a field declaration and its current value to a
//! verdict. No side effects; the controller decides what to do with
//! the result.

use super::field::{FieldKind, FieldSpec};

/// Error text for an empty required field
pub const REQUIRED_ERROR: &str = "This field is required";
/// Error text for a malformed email address
pub const EMAIL_ERROR: &str = "Please enter a valid email address";

/// Outcome of validating one field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub error_text: String,
}

impl Verdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error_text: String::new(),
        }
    }

    pub fn invalid(error_text: &str) -> Self {
        Self {
            valid: false,
            error_text: error_text.to_string(),
        }
    }
}

/// Validate a value against its field declaration.
///
/// Rules are checked in order and the first failure wins: required
/// fields reject blank values, email fields reject values that do not
/// look like `local@domain.tld`. An empty optional field is valid.
pub fn validate(spec: &FieldSpec, value: &str) -> Verdict {
    if spec.required && value.trim().is_empty() {
        return Verdict::invalid(REQUIRED_ERROR);
    }

    if spec.kind == FieldKind::Email && !value.is_empty() && !is_email(value) {
        return Verdict::invalid(EMAIL_ERROR);
    }

    Verdict::valid()
}

/// Shape check for an email address: no whitespace, exactly one `@`
/// with a non-empty local part, and a `.` inside the domain with at
/// least one character on each side.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::super::field::FieldSpec;
    use super::*;

    mod required_rule {
        use super::*;

        #[test]
        fn test_empty_required_field_is_invalid() {
            let spec = FieldSpec::email("email", "Email", true);
            let verdict = validate(&spec, "");
            assert_eq!(verdict, Verdict::invalid(REQUIRED_ERROR));
        }

        #[test]
        fn test_whitespace_only_required_field_is_invalid() {
            let spec = FieldSpec::text("name", "Name", true);
            let verdict = validate(&spec, "   \t");
            assert_eq!(verdict, Verdict::invalid(REQUIRED_ERROR));
        }

        #[test]
        fn test_empty_optional_field_is_valid() {
            let spec = FieldSpec::text("subject", "Subject", false);
            assert_eq!(validate(&spec, ""), Verdict::valid());
        }

        #[test]
        fn test_required_wins_over_email_rule() {
            // An empty required email reports the required error, not
            // the email error.
            let spec = FieldSpec::email("email", "Email", true);
            assert_eq!(validate(&spec, ""), Verdict::invalid(REQUIRED_ERROR));
        }
    }

    mod email_rule {
        use super::*;

        fn email_spec() -> FieldSpec {
            FieldSpec::email("email", "Email", true)
        }

        #[test]
        fn test_simple_address_is_valid() {
            assert_eq!(validate(&email_spec(), "a@b.com"), Verdict::valid());
        }

        #[test]
        fn test_subdomains_are_valid() {
            assert_eq!(
                validate(&email_spec(), "user@mail.example.org"),
                Verdict::valid()
            );
        }

        #[test]
        fn test_missing_at_is_invalid() {
            assert_eq!(
                validate(&email_spec(), "not-an-email"),
                Verdict::invalid(EMAIL_ERROR)
            );
        }

        #[test]
        fn test_missing_dot_after_at_is_invalid() {
            assert_eq!(
                validate(&email_spec(), "user@localhost"),
                Verdict::invalid(EMAIL_ERROR)
            );
        }

        #[test]
        fn test_empty_local_part_is_invalid() {
            assert_eq!(
                validate(&email_spec(), "@example.com"),
                Verdict::invalid(EMAIL_ERROR)
            );
        }

        #[test]
        fn test_dot_directly_after_at_is_invalid() {
            assert_eq!(
                validate(&email_spec(), "a@.com"),
                Verdict::invalid(EMAIL_ERROR)
            );
        }

        #[test]
        fn test_trailing_dot_only_is_invalid() {
            assert_eq!(validate(&email_spec(), "a@b."), Verdict::invalid(EMAIL_ERROR));
        }

        #[test]
        fn test_internal_whitespace_is_invalid() {
            assert_eq!(
                validate(&email_spec(), "a b@c.com"),
                Verdict::invalid(EMAIL_ERROR)
            );
        }

        #[test]
        fn test_two_at_signs_is_invalid() {
            assert_eq!(
                validate(&email_spec(), "a@b@c.com"),
                Verdict::invalid(EMAIL_ERROR)
            );
        }

        #[test]
        fn test_optional_email_left_empty_is_valid() {
            let spec = FieldSpec::email("cc", "Cc", false);
            assert_eq!(validate(&spec, ""), Verdict::valid());
        }

        #[test]
        fn test_non_email_kind_skips_email_rule() {
            let spec = FieldSpec::text("name", "Name", true);
            assert_eq!(validate(&spec, "not-an-email"), Verdict::valid());
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        let spec = FieldSpec::email("email", "Email", true);
        let first = validate(&spec, "nope");
        let second = validate(&spec, "nope");
        assert_eq!(first, second);
    }
}
