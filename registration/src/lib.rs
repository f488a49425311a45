//! Registration submission workflow for the storefront web client.
//!
//! Collects name, email, and password input, enforces the client-side
//! validation rules, creates the account through the signup endpoint, and
//! establishes a session with the freshly minted credentials. Navigation and
//! notification surfaces stay behind ports so hosts plug in their own router
//! and toast implementations.

pub mod domain;
pub mod outbound;

/// Workflow entry points most hosts need.
pub use domain::registration_service::{RedirectWatcher, RegistrationService, SubmitOutcome};
