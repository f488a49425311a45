//! Wire payloads for the credentials sign-in endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::ports::SessionUser;

/// JSON body posted to the sign-in endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct SignInRequestDto<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
    pub(crate) redirect: bool,
}

/// Response envelope from the sign-in endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SignInResponseDto {
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) user: Option<SessionUserDto>,
}

/// User payload attached to a successful sign-in response.
#[derive(Debug, Deserialize)]
pub(crate) struct SessionUserDto {
    #[serde(default)]
    pub(crate) name: Option<String>,
    pub(crate) email: String,
}

impl From<SessionUserDto> for SessionUser {
    fn from(dto: SessionUserDto) -> Self {
        let user = Self::new(dto.email);
        match dto.name {
            Some(name) => user.with_name(name),
            None => user,
        }
    }
}
