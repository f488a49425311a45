//! Reqwest-backed credentials session provider.
//!
//! Performs the sign-in POST and owns the watchable session signal the
//! redirect watcher observes. The signal only becomes authenticated once a
//! sign-in attempt resolves successfully, so navigation can never race ahead
//! of an unresolved submission.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tokio::sync::watch;
use tracing::debug;

use super::dto::{SignInRequestDto, SignInResponseDto};
use crate::domain::ports::{
    SessionProvider, SessionProviderError, SessionState, SessionUser, SignInOutcome,
    SignInRequest,
};
use crate::outbound::http::{HttpClientConfig, failure_message};

/// How one sign-in response should be folded into the workflow.
enum SignInDisposition {
    /// Session established for this user.
    Authenticated(SessionUser),
    /// Provider refused the credentials; reason goes back in-band.
    Refused(String),
}

/// Session provider performing credential sign-in against one endpoint.
pub struct CredentialsSessionProvider {
    client: Client,
    endpoint: Url,
    session: watch::Sender<SessionState>,
}

impl CredentialsSessionProvider {
    /// Build a provider with default identity and timeout settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        Self::with_config(endpoint, &HttpClientConfig::default())
    }

    /// Build a provider with explicit identity and timeout settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_config(endpoint: Url, config: &HttpClientConfig) -> Result<Self, reqwest::Error> {
        let client = config.build_client()?;
        let (session, _) = watch::channel(SessionState::anonymous());
        Ok(Self {
            client,
            endpoint,
            session,
        })
    }
}

#[async_trait]
impl SessionProvider for CredentialsSessionProvider {
    async fn sign_in(
        &self,
        request: SignInRequest,
    ) -> Result<SignInOutcome, SessionProviderError> {
        let body = SignInRequestDto {
            email: request.email(),
            password: request.password(),
            redirect: request.redirect(),
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;

        match interpret_response(status, bytes.as_ref(), request.email()) {
            SignInDisposition::Authenticated(user) => {
                debug!(email = user.email(), "session established");
                self.session.send_replace(SessionState::authenticated(user));
                Ok(SignInOutcome::success())
            }
            SignInDisposition::Refused(message) => Ok(SignInOutcome::failure(message)),
        }
    }

    fn session(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }
}

fn map_transport_error(error: reqwest::Error) -> SessionProviderError {
    SessionProviderError::transport(error.to_string())
}

/// Fold status and body into a disposition.
///
/// An `error` field always wins, whatever the status. A success status
/// without one authenticates, taking the user from the body when present and
/// falling back to the email that was signed in. Anything else is refused
/// with the extracted failure reason.
fn interpret_response(status: StatusCode, body: &[u8], email: &str) -> SignInDisposition {
    let decoded = serde_json::from_slice::<SignInResponseDto>(body).unwrap_or_default();
    if let Some(message) = decoded.error {
        return SignInDisposition::Refused(message);
    }
    if !status.is_success() {
        return SignInDisposition::Refused(failure_message(status, body));
    }

    let user = decoded
        .user
        .map_or_else(|| SessionUser::new(email), SessionUser::from);
    SignInDisposition::Authenticated(user)
}
