//! Registration form field state.
//!
//! Keep keystroke handling outside the validation layer by exposing a single
//! mutable container the host rendering layer writes into. Password material
//! lives in zeroizing buffers so discarded drafts do not linger in memory.

use std::fmt;

use zeroize::Zeroizing;

/// Identifier for one of the four registration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Display name for the new account.
    Name,
    /// Email address used as the login identifier.
    Email,
    /// Chosen password.
    Password,
    /// Confirmation copy of the chosen password.
    ConfirmPassword,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 4] = [
        Self::Name,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Stable field name used in error payloads and host bindings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable registration input, mutated on every input event and discarded
/// once a successful submission navigates away.
///
/// # Examples
/// ```
/// use registration::domain::{Field, RegistrationInput};
///
/// let mut input = RegistrationInput::new();
/// input.set(Field::Email, "ann@x.com");
/// assert_eq!(input.email(), "ann@x.com");
/// assert_eq!(input.name(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    name: String,
    email: String,
    password: Zeroizing<String>,
    confirm_password: Zeroizing<String>,
}

impl RegistrationInput {
    /// Empty input, as presented on first render.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled input, mainly for tests and fixtures.
    pub fn from_parts(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
            confirm_password: Zeroizing::new(confirm_password.into()),
        }
    }

    /// Overwrite one field with the latest value from the host.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Password => self.password = Zeroizing::new(value),
            Field::ConfirmPassword => self.confirm_password = Zeroizing::new(value),
        }
    }

    /// Current value of the given field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => self.name.as_str(),
            Field::Email => self.email.as_str(),
            Field::Password => self.password.as_str(),
            Field::ConfirmPassword => self.confirm_password.as_str(),
        }
    }

    /// Display name for the new account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address used as the login identifier.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Confirmation copy of the chosen password.
    pub fn confirm_password(&self) -> &str {
        self.confirm_password.as_str()
    }
}

impl Default for RegistrationInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: Zeroizing::new(String::new()),
            confirm_password: Zeroizing::new(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Field::Name, "Ann")]
    #[case(Field::Email, "ann@x.com")]
    #[case(Field::Password, "secret1")]
    #[case(Field::ConfirmPassword, "secret1")]
    fn set_then_get_round_trips(#[case] field: Field, #[case] value: &str) {
        let mut input = RegistrationInput::new();
        input.set(field, value);
        assert_eq!(input.get(field), value);
    }

    #[rstest]
    fn later_values_replace_earlier_ones() {
        let mut input = RegistrationInput::new();
        input.set(Field::Password, "first");
        input.set(Field::Password, "second");
        assert_eq!(input.password(), "second");
    }

    #[rstest]
    #[case(Field::Name, "name")]
    #[case(Field::ConfirmPassword, "confirmPassword")]
    fn field_names_are_stable(#[case] field: Field, #[case] expected: &str) {
        assert_eq!(field.as_str(), expected);
        assert_eq!(field.to_string(), expected);
    }
}
