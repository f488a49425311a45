//! Driven ports for the registration workflow's collaborators.
//!
//! Ports describe how the workflow expects to interact with the signup
//! endpoint, the session provider, the hosting router, and the notification
//! sink. Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants, and the session and redirect-target
//! signals are watch channels so the workflow observes changes instead of
//! polling framework state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use zeroize::Zeroizing;

/// Payload for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl SignupRequest {
    /// Assemble the account-creation payload.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
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
}

/// Errors surfaced by the account-creation adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupServiceError {
    /// The service refused the request; carries its human-readable reason.
    #[error("{message}")]
    Rejected {
        /// Reason reported by the service.
        message: String,
    },
    /// The request never produced a usable response.
    #[error("signup request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}

impl SignupServiceError {
    /// Helper for service-side rejections.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message } | Self::Transport { message } => message.as_str(),
        }
    }
}

/// Account-creation port, conceptually `POST /api/auth/signup`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account for the given name, email, and password.
    ///
    /// # Errors
    ///
    /// Returns an error when the service rejects the payload or the request
    /// cannot be completed.
    async fn create(&self, request: SignupRequest) -> Result<(), SignupServiceError>;
}

/// Sign-in strategy requested from the session provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignInStrategy {
    /// Email/password credentials.
    #[default]
    Credentials,
}

/// Request to establish a session from freshly created credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    strategy: SignInStrategy,
    redirect: bool,
    email: String,
    password: Zeroizing<String>,
}

impl SignInRequest {
    /// Credentials sign-in with the provider's automatic navigation side
    /// effect suppressed, so the caller can inspect the outcome first.
    pub fn credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            strategy: SignInStrategy::Credentials,
            redirect: false,
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Requested sign-in strategy.
    pub const fn strategy(&self) -> SignInStrategy {
        self.strategy
    }

    /// Whether the provider may navigate on its own after sign-in.
    pub const fn redirect(&self) -> bool {
        self.redirect
    }

    /// Email address to authenticate.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password to authenticate with.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// In-band result of a sign-in attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInOutcome {
    error: Option<String>,
}

impl SignInOutcome {
    /// Successful sign-in.
    pub const fn success() -> Self {
        Self { error: None }
    }

    /// Failed sign-in with the provider's reason.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Provider-reported failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Errors surfaced by the session provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionProviderError {
    /// The sign-in request never produced a usable response.
    #[error("sign-in request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}

impl SessionProviderError {
    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Transport { message } => message.as_str(),
        }
    }
}

/// Authenticated user carried by the session signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    name: Option<String>,
    email: String,
}

impl SessionUser {
    /// User known only by email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// Attach the user's display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, when the provider reported one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Email address the session was established for.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Reactive view of the current authentication state.
///
/// # Examples
/// ```
/// use registration::domain::ports::{SessionState, SessionUser};
///
/// assert!(!SessionState::anonymous().is_authenticated());
/// let state = SessionState::authenticated(SessionUser::new("ann@x.com"));
/// assert!(state.is_authenticated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<SessionUser>,
}

impl SessionState {
    /// No authenticated user.
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// Session holding an authenticated user.
    pub const fn authenticated(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Whether a user is currently authenticated.
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Session port: credential sign-in plus a watchable session signal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Attempt to establish a session. Failures the provider understands are
    /// reported in-band through [`SignInOutcome`].
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be completed at all.
    async fn sign_in(&self, request: SignInRequest)
    -> Result<SignInOutcome, SessionProviderError>;

    /// Subscribe to the current session state.
    fn session(&self) -> watch::Receiver<SessionState>;
}

/// Navigation port over the hosting router.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Subscribe to the redirect target carried in the query string.
    fn redirect_target(&self) -> watch::Receiver<Option<String>>;

    /// Navigate to the given target.
    async fn push(&self, target: &str);
}

/// User-visible, fire-and-forget notification sink.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Surface an error message to the user.
    fn error(&self, message: &str);
}

fn recover<'a, T>(lock: &'a Mutex<T>) -> MutexGuard<'a, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fixture session provider for tests and headless wiring.
///
/// Answers sign-in from a canned outcome and flips the session signal to
/// authenticated when that outcome is a success, mirroring how a real
/// provider's session only changes once sign-in resolves.
#[derive(Debug)]
pub struct FixtureSessionProvider {
    outcome: SignInOutcome,
    session: watch::Sender<SessionState>,
}

impl FixtureSessionProvider {
    /// Provider answering every sign-in with the given outcome.
    pub fn new(outcome: SignInOutcome) -> Self {
        let (session, _) = watch::channel(SessionState::anonymous());
        Self { outcome, session }
    }

    /// Provider whose sign-in always succeeds.
    pub fn accepting() -> Self {
        Self::new(SignInOutcome::success())
    }

    /// Provider whose sign-in always fails with the given message.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self::new(SignInOutcome::failure(message))
    }

    /// Mark the session as authenticated out of band, as a visitor who
    /// signed in elsewhere would appear.
    pub fn authenticate(&self, user: SessionUser) {
        self.session.send_replace(SessionState::authenticated(user));
    }
}

#[async_trait]
impl SessionProvider for FixtureSessionProvider {
    async fn sign_in(
        &self,
        request: SignInRequest,
    ) -> Result<SignInOutcome, SessionProviderError> {
        if self.outcome.error().is_none() {
            self.session
                .send_replace(SessionState::authenticated(SessionUser::new(request.email())));
        }
        Ok(self.outcome.clone())
    }

    fn session(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }
}

/// Fixture navigator recording every navigation.
#[derive(Debug)]
pub struct FixtureNavigator {
    redirect: watch::Sender<Option<String>>,
    pushed: Mutex<Vec<String>>,
}

impl FixtureNavigator {
    /// Navigator seeded with the given redirect target.
    pub fn new(redirect: Option<String>) -> Self {
        let (sender, _) = watch::channel(redirect);
        Self {
            redirect: sender,
            pushed: Mutex::new(Vec::new()),
        }
    }

    /// Update the redirect target, as a query-string change would.
    pub fn set_redirect(&self, target: Option<String>) {
        self.redirect.send_replace(target);
    }

    /// Every target navigated to so far, oldest first.
    pub fn pushed(&self) -> Vec<String> {
        recover(&self.pushed).clone()
    }
}

impl Default for FixtureNavigator {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Navigator for FixtureNavigator {
    fn redirect_target(&self) -> watch::Receiver<Option<String>> {
        self.redirect.subscribe()
    }

    async fn push(&self, target: &str) {
        recover(&self.pushed).push(target.to_owned());
    }
}

/// Fixture notifier capturing messages for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages surfaced so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        recover(&self.messages).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        recover(&self.messages).push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_provider_authenticates_on_success() {
        let provider = FixtureSessionProvider::accepting();
        let session = provider.session();

        let outcome = provider
            .sign_in(SignInRequest::credentials("ann@x.com", "secret1"))
            .await
            .expect("fixture never fails at the transport level");

        assert_eq!(outcome.error(), None);
        let state = session.borrow().clone();
        assert!(state.is_authenticated());
        assert_eq!(state.user().map(SessionUser::email), Some("ann@x.com"));
    }

    #[tokio::test]
    async fn fixture_provider_stays_anonymous_on_rejection() {
        let provider = FixtureSessionProvider::rejecting("Invalid email or password");
        let session = provider.session();

        let outcome = provider
            .sign_in(SignInRequest::credentials("ann@x.com", "wrong"))
            .await
            .expect("fixture never fails at the transport level");

        assert_eq!(outcome.error(), Some("Invalid email or password"));
        assert!(!session.borrow().is_authenticated());
    }

    #[tokio::test]
    async fn fixture_navigator_records_pushes_in_order() {
        let navigator = FixtureNavigator::new(Some("/shipping".to_owned()));
        navigator.push("/shipping").await;
        navigator.push("/").await;
        assert_eq!(
            navigator.pushed(),
            vec!["/shipping".to_owned(), "/".to_owned()]
        );
    }

    #[rstest]
    fn sign_in_request_suppresses_provider_navigation() {
        let request = SignInRequest::credentials("ann@x.com", "secret1");
        assert!(!request.redirect());
        assert_eq!(request.strategy(), SignInStrategy::Credentials);
    }

    #[rstest]
    fn recording_notifier_keeps_messages() {
        let notifier = RecordingNotifier::new();
        notifier.error("first");
        notifier.error("second");
        assert_eq!(
            notifier.messages(),
            vec!["first".to_owned(), "second".to_owned()]
        );
    }

    #[rstest]
    #[case(SignupServiceError::rejected("Email already registered"), "Email already registered")]
    #[case(SignupServiceError::transport("connection refused"), "connection refused")]
    fn signup_errors_expose_a_user_message(
        #[case] error: SignupServiceError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.user_message(), expected);
    }
}
