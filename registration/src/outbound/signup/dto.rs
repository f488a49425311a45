//! Wire payload for the signup endpoint.

use serde::Serialize;

use crate::domain::ports::SignupRequest;

/// JSON body posted to the signup endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct SignupRequestDto<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

impl<'a> From<&'a SignupRequest> for SignupRequestDto<'a> {
    fn from(request: &'a SignupRequest) -> Self {
        Self {
            name: request.name(),
            email: request.email(),
            password: request.password(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_the_three_account_fields() {
        let request = SignupRequest::new("Ann", "ann@x.com", "secret1");
        let body = serde_json::to_value(SignupRequestDto::from(&request))
            .expect("payload must serialise");
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Ann",
                "email": "ann@x.com",
                "password": "secret1",
            })
        );
    }
}
