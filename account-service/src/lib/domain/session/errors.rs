use auth::JwtError;
use auth::PasswordError;
use auth::TokenKind;
use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Errors raised by session operations.
///
/// The first six variants are client-input conditions; the rest indicate a
/// server-side fault.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Refresh token is missing")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Expected {expected} token, got {actual} token")]
    WrongTokenKind {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<JwtError> for SessionError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => SessionError::ExpiredToken,
            JwtError::WrongTokenKind { expected, actual } => {
                SessionError::WrongTokenKind { expected, actual }
            }
            JwtError::InvalidToken(reason) => SessionError::InvalidToken(reason),
            JwtError::EncodingFailed(_)
            | JwtError::WeakSecret { .. }
            | JwtError::InvalidLifetime { .. } => SessionError::Signing(err.to_string()),
        }
    }
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => SessionError::DuplicateEmail(email),
            UserError::NotFound(id) => SessionError::UserNotFound(id),
            // Validation failures here come from rows already in storage
            UserError::InvalidEmail(_)
            | UserError::InvalidNickname(_)
            | UserError::DatabaseError(_) => SessionError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::errors::EmailError;
    use crate::domain::user::errors::NicknameError;

    #[test]
    fn test_token_errors_keep_their_kind() {
        assert!(matches!(
            SessionError::from(JwtError::TokenExpired),
            SessionError::ExpiredToken
        ));
        assert!(matches!(
            SessionError::from(JwtError::InvalidToken("bad".to_string())),
            SessionError::InvalidToken(_)
        ));
        assert!(matches!(
            SessionError::from(JwtError::WrongTokenKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            }),
            SessionError::WrongTokenKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            }
        ));
        assert!(matches!(
            SessionError::from(JwtError::EncodingFailed("boom".to_string())),
            SessionError::Signing(_)
        ));
        assert!(matches!(
            SessionError::from(JwtError::InvalidLifetime {
                kind: TokenKind::Access,
                reason: "expiry is out of range".to_string(),
            }),
            SessionError::Signing(_)
        ));
    }

    #[test]
    fn test_unreadable_stored_row_is_storage_fault() {
        let err = SessionError::from(UserError::InvalidEmail(EmailError::InvalidFormat(
            "not-an-email".to_string(),
        )));
        assert!(matches!(err, SessionError::Storage(_)));

        let err = SessionError::from(UserError::InvalidNickname(NicknameError::Empty));
        assert!(matches!(err, SessionError::Storage(_)));
    }

    #[test]
    fn test_uniqueness_conflict_becomes_duplicate_email() {
        let err = SessionError::from(UserError::EmailAlreadyExists("a@x.com".to_string()));
        assert!(matches!(err, SessionError::DuplicateEmail(ref email) if email == "a@x.com"));
    }
}
