//! Cross-link helpers for the registration page footer.

use super::registration_service::DEFAULT_REDIRECT_TARGET;

/// Destination for the "already have an account" footer link, carrying the
/// current redirect target so sign-in lands the user where they were headed.
///
/// # Examples
/// ```
/// use registration::domain::links::login_link;
///
/// assert_eq!(login_link(None), "/login?redirect=/");
/// assert_eq!(login_link(Some("/shipping")), "/login?redirect=/shipping");
/// ```
pub fn login_link(redirect: Option<&str>) -> String {
    let target = redirect.unwrap_or(DEFAULT_REDIRECT_TARGET);
    format!("/login?redirect={target}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "/login?redirect=/")]
    #[case(Some("/shipping"), "/login?redirect=/shipping")]
    #[case(Some("/"), "/login?redirect=/")]
    fn carries_the_redirect_target(#[case] redirect: Option<&str>, #[case] expected: &str) {
        assert_eq!(login_link(redirect), expected);
    }
}
