use auth::IssuedToken;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Nickname;
use crate::domain::user::models::Password;

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access-token";

/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh-token";

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub nickname: Nickname,
    pub image: Option<String>,
}

impl RegisterUserCommand {
    pub fn new(
        email: EmailAddress,
        password: Password,
        nickname: Nickname,
        image: Option<String>,
    ) -> Self {
        Self {
            email,
            password,
            nickname,
            image,
        }
    }
}

/// Access and refresh token minted together for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: IssuedToken,
    pub refresh_token: IssuedToken,
}

/// Instruction to set one session cookie.
///
/// Transport attributes (HttpOnly, Path, Secure, SameSite) are applied by the
/// HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: &'static str,
    pub value: String,
    pub max_age_seconds: i64,
}

/// Both session cookies, either carrying a token pair or clearing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookies {
    pub access: SessionCookie,
    pub refresh: SessionCookie,
}

impl SessionCookies {
    /// Cookies delivering a token pair, each living as long as its token.
    pub fn issued(pair: &TokenPair) -> Self {
        Self {
            access: SessionCookie {
                name: ACCESS_TOKEN_COOKIE,
                value: pair.access_token.token.clone(),
                max_age_seconds: pair.access_token.ttl_seconds,
            },
            refresh: SessionCookie {
                name: REFRESH_TOKEN_COOKIE,
                value: pair.refresh_token.token.clone(),
                max_age_seconds: pair.refresh_token.ttl_seconds,
            },
        }
    }

    /// Empty, immediately expiring cookies.
    pub fn cleared() -> Self {
        Self {
            access: SessionCookie {
                name: ACCESS_TOKEN_COOKIE,
                value: String::new(),
                max_age_seconds: 0,
            },
            refresh: SessionCookie {
                name: REFRESH_TOKEN_COOKIE,
                value: String::new(),
                max_age_seconds: 0,
            },
        }
    }

    pub fn into_array(self) -> [SessionCookie; 2] {
        [self.access, self.refresh]
    }
}
