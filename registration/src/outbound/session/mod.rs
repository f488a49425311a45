//! HTTP adapter for the credentials session provider.

mod dto;
mod http_provider;

pub use http_provider::CredentialsSessionProvider;
