//! Wires the HTTP adapters together against a locally running storefront
//! API and walks one registration through signup, sign-in, and redirect.

use std::sync::Arc;
use std::time::Duration;

use registration::domain::ports::FixtureNavigator;
use registration::domain::{Field, RegistrationService};
use registration::outbound::{CredentialsSessionProvider, HttpSignupService, TracingNotifier};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let signup = Arc::new(HttpSignupService::new(Url::parse(
        "http://localhost:3000/api/auth/signup",
    )?)?);
    let sessions = Arc::new(CredentialsSessionProvider::new(Url::parse(
        "http://localhost:3000/api/auth/callback/credentials",
    )?)?);
    let navigator = Arc::new(FixtureNavigator::new(Some("/shipping".to_owned())));
    let notifier = Arc::new(TracingNotifier);

    let mut service = RegistrationService::new(
        signup,
        Arc::clone(&sessions),
        Arc::clone(&navigator),
        notifier,
    );
    service.set_field(Field::Name, "Ann Example");
    service.set_field(Field::Email, "ann@example.com");
    service.set_field(Field::Password, "secret1");
    service.set_field(Field::ConfirmPassword, "secret1");

    let navigation = tokio::spawn(service.redirect_watcher().run());

    let outcome = service.submit().await;
    // Give the watcher a beat to observe the session change.
    tokio::time::sleep(Duration::from_millis(50)).await;
    info!(?outcome, navigated = ?navigator.pushed(), "submission finished");

    navigation.abort();
    Ok(())
}
