//! Shared response handling for the outbound HTTP adapters.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = "storefront-web-client/0.1";
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Outbound identity and timeout settings shared by the HTTP adapters.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// HTTP user-agent sent with each request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpClientConfig {
    /// Build a reqwest client honouring the identity and timeout settings.
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
    }
}

/// Error envelope used by the storefront API.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBodyDto {
    #[serde(default)]
    pub(crate) message: Option<String>,
}

/// Human-readable failure reason for a non-success response.
///
/// Prefers the service's own `message` field; otherwise falls back to a
/// status line with a bounded body preview.
pub(crate) fn failure_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(ErrorBodyDto {
        message: Some(message),
    }) = serde_json::from_slice(body)
    {
        if !message.trim().is_empty() {
            return message;
        }
    }

    let preview = body_preview(body);
    if preview.is_empty() {
        format!("request failed with status {}", status.as_u16())
    } else {
        format!("request failed with status {}: {preview}", status.as_u16())
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
