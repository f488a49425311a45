//! Domain types and services for the registration workflow.
//!
//! Purpose: Hold the form state, the per-field validation rules, the driven
//! ports for the external collaborators, and the service that orchestrates
//! submission and post-authentication navigation. Types stay transport
//! agnostic; outbound adapters map them onto the wire.
//!
//! Public surface:
//! - `RegistrationInput` / `Field` — editable form state.
//! - `validate` / `FieldError` — the validation gate.
//! - `ports` — collaborator traits and their error types.
//! - `RegistrationService` / `RedirectWatcher` — orchestration.

pub mod form;
pub mod links;
pub mod ports;
pub mod registration_service;
pub mod validation;

pub use self::form::{Field, RegistrationInput};
pub use self::registration_service::{
    DEFAULT_REDIRECT_TARGET, RedirectWatcher, RegistrationService, SubmitOutcome,
};
pub use self::validation::{FieldError, PASSWORD_MIN, RuleKind, validate, validate_field};
