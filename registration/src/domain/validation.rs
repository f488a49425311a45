//! Per-field validation rules for the registration form.
//!
//! Each field carries an explicit ordered rule list; a rule is a pure
//! predicate plus the message shown when it fails. The first failing rule
//! wins, so a field holds at most one error at a time, and submission is
//! blocked while any field has a current error.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::form::{Field, RegistrationInput};

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 6;

const EMAIL_PATTERN: &str = "^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\\.[A-Za-z0-9-.]+$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(EMAIL_PATTERN)
            .unwrap_or_else(|error| panic!("email pattern failed to compile: {error}"))
    })
}

/// Category of the rule that produced a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Field must be non-empty.
    Required,
    /// Field must match a pattern.
    Pattern,
    /// Field must reach a minimum length.
    MinLength,
    /// Field must satisfy a cross-field predicate.
    Validate,
}

impl RuleKind {
    /// Stable rule name used in host bindings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern => "pattern",
            Self::MinLength => "minLength",
            Self::Validate => "validate",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: Field,
    kind: RuleKind,
    message: String,
}

impl FieldError {
    fn new(field: Field, kind: RuleKind, message: &'static str) -> Self {
        Self {
            field,
            kind,
            message: message.to_owned(),
        }
    }

    /// Field the error belongs to.
    pub const fn field(&self) -> Field {
        self.field
    }

    /// Rule category that failed.
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Message shown next to the field.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One validation rule: a pure predicate plus its failure message.
struct Rule {
    kind: RuleKind,
    message: &'static str,
    passes: fn(&str, &RegistrationInput) -> bool,
}

fn present(value: &str, _input: &RegistrationInput) -> bool {
    !value.is_empty()
}

fn matches_email(value: &str, _input: &RegistrationInput) -> bool {
    email_regex().is_match(value)
}

fn long_enough(value: &str, _input: &RegistrationInput) -> bool {
    value.chars().count() >= PASSWORD_MIN
}

fn matches_password(value: &str, input: &RegistrationInput) -> bool {
    value == input.password()
}

static NAME_RULES: [Rule; 1] = [Rule {
    kind: RuleKind::Required,
    message: "Please enter name.",
    passes: present,
}];

static EMAIL_RULES: [Rule; 2] = [
    Rule {
        kind: RuleKind::Required,
        message: "Please enter the email.",
        passes: present,
    },
    Rule {
        kind: RuleKind::Pattern,
        message: "Enter valid email address.",
        passes: matches_email,
    },
];

static PASSWORD_RULES: [Rule; 2] = [
    Rule {
        kind: RuleKind::Required,
        message: "Please enter the password.",
        passes: present,
    },
    Rule {
        kind: RuleKind::MinLength,
        message: "password should be more then 5 characters",
        passes: long_enough,
    },
];

static CONFIRM_PASSWORD_RULES: [Rule; 3] = [
    Rule {
        kind: RuleKind::Required,
        message: "Please enter the confirm password.",
        passes: present,
    },
    Rule {
        kind: RuleKind::Validate,
        message: "Password do not match",
        passes: matches_password,
    },
    Rule {
        kind: RuleKind::MinLength,
        message: "password should be more then 5 characters",
        passes: long_enough,
    },
];

fn rules_for(field: Field) -> &'static [Rule] {
    match field {
        Field::Name => &NAME_RULES,
        Field::Email => &EMAIL_RULES,
        Field::Password => &PASSWORD_RULES,
        Field::ConfirmPassword => &CONFIRM_PASSWORD_RULES,
    }
}

/// Evaluate one field's rules in order, yielding the first failure.
pub fn validate_field(input: &RegistrationInput, field: Field) -> Option<FieldError> {
    let value = input.get(field);
    rules_for(field)
        .iter()
        .find(|rule| !(rule.passes)(value, input))
        .map(|rule| FieldError::new(field, rule.kind, rule.message))
}

/// Evaluate every field, yielding at most one error per field.
///
/// # Examples
/// ```
/// use registration::domain::{Field, RegistrationInput, validate};
///
/// let mut input = RegistrationInput::new();
/// input.set(Field::Name, "Ann");
/// let errors = validate(&input);
/// assert!(errors.iter().any(|error| error.field() == Field::Email));
/// assert!(errors.iter().all(|error| error.field() != Field::Name));
/// ```
pub fn validate(input: &RegistrationInput) -> Vec<FieldError> {
    Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(input, field))
        .collect()
}
