//! Outbound adapters for the registration workflow's collaborators.
//!
//! Adapters own transport details only: request serialisation, timeouts,
//! HTTP error mapping, and extraction of human-readable failure messages.
//! Domain semantics stay in `crate::domain`.

pub(crate) mod http;
pub mod notify;
pub mod session;
pub mod signup;

pub use notify::TracingNotifier;
pub use session::CredentialsSessionProvider;
pub use signup::HttpSignupService;

pub use http::HttpClientConfig;
