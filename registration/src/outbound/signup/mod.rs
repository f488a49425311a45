//! HTTP adapter for the account-creation service.

mod dto;
mod http_client;

pub use http_client::HttpSignupService;
