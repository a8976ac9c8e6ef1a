//! Field validators

use regex::Regex;

/// Minimum password length when the configuration does not override it
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Anything shaped like `local@domain.tld`
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Verdict for a single field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Pure check of a trimmed field value
pub trait FieldValidator: Send + Sync {
    fn validate(&self, value: &str) -> ValidationResult;
}

impl<F> FieldValidator for F
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &str) -> ValidationResult {
        self(value)
    }
}

/// Requires a present, plausibly shaped email address
pub struct EmailValidator {
    pattern: Regex,
}

impl EmailValidator {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(EMAIL_PATTERN)?,
        })
    }
}

impl FieldValidator for EmailValidator {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() {
            ValidationResult::invalid("Email is required")
        } else if !self.pattern.is_match(value) {
            ValidationResult::invalid("Please enter a valid email address")
        } else {
            ValidationResult::ok()
        }
    }
}

/// Requires a password of at least `min_length` characters
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LENGTH)
    }
}

impl FieldValidator for PasswordValidator {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() {
            ValidationResult::invalid("Password is required")
        } else if value.chars().count() < self.min_length {
            ValidationResult::invalid(format!(
                "Password must be at least {} characters long",
                self.min_length
            ))
        } else {
            ValidationResult::ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod email_validator {
        use super::*;

        fn validator() -> EmailValidator {
            EmailValidator::new().unwrap()
        }

        #[test]
        fn test_accepts_plain_address() {
            assert!(validator().validate("a@b.com").valid);
            assert!(validator().validate("admin@cyberlab.com").valid);
        }

        #[test]
        fn test_empty_is_required() {
            let result = validator().validate("");
            assert!(!result.valid);
            assert_eq!(result.message, "Email is required");
        }

        #[test]
        fn test_rejects_malformed() {
            for value in ["not-an-email", "a@b", "@b.com", "a b@c.com", "a@@b.com"] {
                let result = validator().validate(value);
                assert!(!result.valid, "{value} should be rejected");
                assert_eq!(result.message, "Please enter a valid email address");
            }
        }
    }

    mod password_validator {
        use super::*;

        #[test]
        fn test_accepts_long_enough() {
            assert!(PasswordValidator::default().validate("validPass1").valid);
            assert!(PasswordValidator::default().validate("123456").valid);
        }

        #[test]
        fn test_empty_is_required() {
            let result = PasswordValidator::default().validate("");
            assert_eq!(result, ValidationResult::invalid("Password is required"));
        }

        #[test]
        fn test_short_password_names_minimum() {
            let result = PasswordValidator::new(8).validate("short");
            assert!(!result.valid);
            assert_eq!(result.message, "Password must be at least 8 characters long");
        }

        #[test]
        fn test_counts_characters_not_bytes() {
            assert!(PasswordValidator::new(6).validate("ääääää").valid);
        }
    }

    #[test]
    fn test_closures_are_validators() {
        let not_admin = |value: &str| {
            if value == "admin" {
                ValidationResult::invalid("reserved")
            } else {
                ValidationResult::ok()
            }
        };
        assert!(!not_admin.validate("admin").valid);
        assert!(FieldValidator::validate(&not_admin, "guest").valid);
    }
}
