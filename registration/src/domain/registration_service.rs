//! Registration submission workflow service.
//!
//! Owns the editable form state, runs the validation gate, and orchestrates
//! account creation followed by credential sign-in. Collaborator failures
//! never escape [`RegistrationService::submit`]; each becomes a single
//! user-facing notification and the form stays usable for another attempt.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::form::{Field, RegistrationInput};
use super::ports::{
    Navigator, Notifier, SessionProvider, SessionState, SignInRequest, SignupRequest,
    SignupService,
};
use super::validation::{FieldError, validate};

/// Destination used when no redirect target was supplied.
pub const DEFAULT_REDIRECT_TARGET: &str = "/";

/// Result of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Field validation failed; nothing reached the network.
    Invalid,
    /// Account created and session established; the redirect watcher takes
    /// over navigation.
    SignedIn,
    /// A collaborator failed and the user was notified.
    Notified,
}

/// Orchestrates the registration form against its collaborators.
///
/// Submission requires exclusive access (`&mut self`), so two submissions can
/// never overlap through this API; a queued duplicate runs only after the
/// first resolves and then fails at the service like any resubmission.
pub struct RegistrationService<S, P, N, T> {
    signup: Arc<S>,
    sessions: Arc<P>,
    navigator: Arc<N>,
    notifier: Arc<T>,
    input: RegistrationInput,
    errors: Vec<FieldError>,
    attempted: bool,
}

impl<S, P, N, T> RegistrationService<S, P, N, T> {
    /// Service over the given collaborators, starting from empty input.
    pub fn new(signup: Arc<S>, sessions: Arc<P>, navigator: Arc<N>, notifier: Arc<T>) -> Self {
        Self {
            signup,
            sessions,
            navigator,
            notifier,
            input: RegistrationInput::new(),
            errors: Vec::new(),
            attempted: false,
        }
    }

    /// Current form input.
    pub const fn input(&self) -> &RegistrationInput {
        &self.input
    }

    /// Current validation errors, at most one per field.
    pub fn errors(&self) -> &[FieldError] {
        self.errors.as_slice()
    }

    /// Current error for a single field, if any.
    pub fn field_error(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field() == field)
    }

    /// Overwrite one field with the latest host-supplied value.
    ///
    /// After the first submission attempt the error set is recomputed on
    /// every change, so feedback tracks the user's typing.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value);
        if self.attempted {
            self.errors = validate(&self.input);
        }
    }
}

impl<S, P, N, T> RegistrationService<S, P, N, T>
where
    S: SignupService,
    P: SessionProvider,
    N: Navigator,
    T: Notifier,
{
    /// Validate and, when clean, create the account and sign the user in.
    ///
    /// The two collaborator calls run sequentially; sign-in is only attempted
    /// once account creation succeeded. Every failure is converted into one
    /// notification, so the caller only learns which leg failed from the
    /// message shown to the user.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.attempted = true;
        self.errors = validate(&self.input);
        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "submission blocked by validation");
            return SubmitOutcome::Invalid;
        }

        self.create_and_sign_in().await
    }

    async fn create_and_sign_in(&self) -> SubmitOutcome {
        let request =
            SignupRequest::new(self.input.name(), self.input.email(), self.input.password());
        if let Err(error) = self.signup.create(request).await {
            warn!(error = %error, "account creation failed");
            self.notifier.error(error.user_message());
            return SubmitOutcome::Notified;
        }

        let sign_in = SignInRequest::credentials(self.input.email(), self.input.password());
        match self.sessions.sign_in(sign_in).await {
            Ok(outcome) => match outcome.error() {
                // The account now exists but the session does not; surfaced
                // as a failure so the user retries sign-in manually.
                Some(message) => {
                    warn!(%message, "sign-in rejected after signup");
                    self.notifier.error(message);
                    SubmitOutcome::Notified
                }
                None => SubmitOutcome::SignedIn,
            },
            Err(error) => {
                warn!(error = %error, "sign-in request failed");
                self.notifier.error(error.user_message());
                SubmitOutcome::Notified
            }
        }
    }

    /// Watcher that performs the post-authentication navigation.
    pub fn redirect_watcher(&self) -> RedirectWatcher<N> {
        RedirectWatcher::new(self.sessions.as_ref(), Arc::clone(&self.navigator))
    }
}

/// Observes the session and redirect-target signals and navigates once an
/// authenticated user appears.
///
/// The watcher evaluates immediately on start, so a visitor who is already
/// authenticated when the form first renders is redirected without any
/// submission. Re-observing unchanged inputs never navigates twice.
pub struct RedirectWatcher<N> {
    navigator: Arc<N>,
    session: watch::Receiver<SessionState>,
    redirect: watch::Receiver<Option<String>>,
    last_target: Option<String>,
}

impl<N: Navigator> RedirectWatcher<N> {
    /// Subscribe to the provider's session signal and the navigator's
    /// redirect-target signal.
    pub fn new<P: SessionProvider + ?Sized>(sessions: &P, navigator: Arc<N>) -> Self {
        let session = sessions.session();
        let redirect = navigator.redirect_target();
        Self {
            navigator,
            session,
            redirect,
            last_target: None,
        }
    }

    /// Run until both upstream signals close, re-observing on every change.
    pub async fn run(mut self) {
        loop {
            self.observe().await;
            tokio::select! {
                changed = self.session.changed() => if changed.is_err() { break },
                changed = self.redirect.changed() => if changed.is_err() { break },
            }
        }
    }

    /// One observation pass: navigate when a user is authenticated, skipping
    /// targets already navigated to.
    pub async fn observe(&mut self) {
        let authenticated = self.session.borrow_and_update().is_authenticated();
        let target = self
            .redirect
            .borrow_and_update()
            .clone()
            .unwrap_or_else(|| DEFAULT_REDIRECT_TARGET.to_owned());
        if !authenticated || self.last_target.as_deref() == Some(target.as_str()) {
            return;
        }

        debug!(%target, "session authenticated, navigating");
        self.navigator.push(&target).await;
        self.last_target = Some(target);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        MockNavigator, MockNotifier, MockSessionProvider, MockSignupService, SignInOutcome,
        SessionProviderError, SignupServiceError,
    };
    use crate::domain::validation::RuleKind;
    use rstest::rstest;

    type Service =
        RegistrationService<MockSignupService, MockSessionProvider, MockNavigator, MockNotifier>;

    fn service(
        signup: MockSignupService,
        sessions: MockSessionProvider,
        notifier: MockNotifier,
    ) -> Service {
        RegistrationService::new(
            Arc::new(signup),
            Arc::new(sessions),
            Arc::new(MockNavigator::new()),
            Arc::new(notifier),
        )
    }

    fn fill_valid(service: &mut Service) {
        service.set_field(Field::Name, "Ann");
        service.set_field(Field::Email, "ann@x.com");
        service.set_field(Field::Password, "secret1");
        service.set_field(Field::ConfirmPassword, "secret1");
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_collaborators() {
        let mut signup = MockSignupService::new();
        signup.expect_create().times(0);
        let mut sessions = MockSessionProvider::new();
        sessions.expect_sign_in().times(0);
        let mut notifier = MockNotifier::new();
        notifier.expect_error().times(0);

        let mut service = service(signup, sessions, notifier);
        fill_valid(&mut service);
        service.set_field(Field::Email, "");

        assert_eq!(service.submit().await, SubmitOutcome::Invalid);
        let error = service
            .field_error(Field::Email)
            .expect("email must carry an error");
        assert_eq!(error.message(), "Please enter the email.");
    }

    #[tokio::test]
    async fn valid_input_creates_account_then_signs_in() {
        let mut signup = MockSignupService::new();
        signup
            .expect_create()
            .withf(|request| {
                request.name() == "Ann"
                    && request.email() == "ann@x.com"
                    && request.password() == "secret1"
            })
            .times(1)
            .return_once(|_| Ok(()));
        let mut sessions = MockSessionProvider::new();
        sessions
            .expect_sign_in()
            .withf(|request| {
                !request.redirect()
                    && request.email() == "ann@x.com"
                    && request.password() == "secret1"
            })
            .times(1)
            .return_once(|_| Ok(SignInOutcome::success()));
        let mut notifier = MockNotifier::new();
        notifier.expect_error().times(0);

        let mut service = service(signup, sessions, notifier);
        fill_valid(&mut service);

        assert_eq!(service.submit().await, SubmitOutcome::SignedIn);
        assert!(service.errors().is_empty());
    }

    #[tokio::test]
    async fn rejected_signup_notifies_and_skips_sign_in() {
        let mut signup = MockSignupService::new();
        signup
            .expect_create()
            .times(1)
            .return_once(|_| Err(SignupServiceError::rejected("Email already registered")));
        let mut sessions = MockSessionProvider::new();
        sessions.expect_sign_in().times(0);
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|message| message == "Email already registered")
            .times(1)
            .return_const(());

        let mut service = service(signup, sessions, notifier);
        fill_valid(&mut service);

        assert_eq!(service.submit().await, SubmitOutcome::Notified);
    }

    #[tokio::test]
    async fn in_band_sign_in_failure_is_notified() {
        let mut signup = MockSignupService::new();
        signup.expect_create().times(1).return_once(|_| Ok(()));
        let mut sessions = MockSessionProvider::new();
        sessions
            .expect_sign_in()
            .times(1)
            .return_once(|_| Ok(SignInOutcome::failure("Invalid email or password")));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|message| message == "Invalid email or password")
            .times(1)
            .return_const(());

        let mut service = service(signup, sessions, notifier);
        fill_valid(&mut service);

        assert_eq!(service.submit().await, SubmitOutcome::Notified);
    }

    #[tokio::test]
    async fn transport_sign_in_failure_is_notified() {
        let mut signup = MockSignupService::new();
        signup.expect_create().times(1).return_once(|_| Ok(()));
        let mut sessions = MockSessionProvider::new();
        sessions
            .expect_sign_in()
            .times(1)
            .return_once(|_| Err(SessionProviderError::transport("connection reset")));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|message| message == "connection reset")
            .times(1)
            .return_const(());

        let mut service = service(signup, sessions, notifier);
        fill_valid(&mut service);

        assert_eq!(service.submit().await, SubmitOutcome::Notified);
    }

    #[tokio::test]
    async fn errors_track_typing_after_first_attempt() {
        let mut signup = MockSignupService::new();
        signup.expect_create().times(0);
        let mut sessions = MockSessionProvider::new();
        sessions.expect_sign_in().times(0);
        let notifier = MockNotifier::new();

        let mut service = service(signup, sessions, notifier);
        fill_valid(&mut service);
        service.set_field(Field::Password, "abc");
        service.set_field(Field::ConfirmPassword, "abc");

        assert_eq!(service.submit().await, SubmitOutcome::Invalid);
        assert_eq!(
            service.field_error(Field::Password).map(FieldError::kind),
            Some(RuleKind::MinLength)
        );

        // Fixing the fields clears their errors without another submit.
        service.set_field(Field::Password, "secret1");
        service.set_field(Field::ConfirmPassword, "secret1");
        assert!(service.errors().is_empty());
    }

    #[rstest]
    fn field_errors_are_absent_before_first_attempt() {
        let mut service = service(
            MockSignupService::new(),
            MockSessionProvider::new(),
            MockNotifier::new(),
        );
        service.set_field(Field::Email, "not-an-email");
        assert!(service.errors().is_empty());
    }
}
