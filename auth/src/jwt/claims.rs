use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::kind::TokenKind;

/// Session token claims.
///
/// Standard RFC 7519 registered claims plus the `kind` discriminator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Token family (access or refresh)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenKind>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create session claims for a subject.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier
    /// * `kind` - Token family
    /// * `issued_at` - Issue instant
    /// * `expires_at` - Expiry instant
    ///
    /// # Returns
    /// Claims with sub, kind, iat, exp and a random jti set
    pub fn for_session(
        subject: impl ToString,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self::new()
            .with_subject(subject)
            .with_kind(kind)
            .with_issued_at(issued_at.timestamp())
            .with_expiration(expires_at.timestamp())
            .with_jwt_id(Uuid::new_v4())
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set JWT ID.
    pub fn with_jwt_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Set token kind.
    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.kind = Some(kind);
        self
    }
}
