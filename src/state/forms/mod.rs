//! Form domain layer
//!
//! Field values, validators and the focus rings of the sign-in and sign-up forms.

mod field;
mod login_form;
mod registration_form;
mod validators;

pub use field::FormFieldState;
pub use login_form::{Focus, Form, LoginForm};
pub use registration_form::{RegistrationForm, CONFIRM_FIELD};
pub use validators::{
    EmailValidator, FieldValidator, PasswordValidator, ValidationResult,
    DEFAULT_MIN_PASSWORD_LENGTH,
};
