use thiserror::Error;

use super::kind::TokenKind;

/// Error type for JWT operations.
///
/// `TokenExpired`, `WrongTokenKind` and `InvalidToken` are kept apart because
/// callers react differently to each: an expired access token can be
/// refreshed, the other two are rejected outright.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Expected {expected} token, got {actual} token")]
    WrongTokenKind {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("Invalid {kind} token lifetime: {reason}")]
    InvalidLifetime { kind: TokenKind, reason: String },
}
