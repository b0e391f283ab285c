use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::identity::Identity;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenKind;

/// Signing material and lifetimes for both token families.
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// A freshly signed token together with its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub kind: TokenKind,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in whole seconds, suitable for a cookie `Max-Age`
    pub ttl_seconds: i64,
}

/// Issues and verifies signed, expiring session tokens.
///
/// Each kind is signed with its own secret and additionally tagged with a
/// `kind` claim, so a token of one family is never accepted as the other.
pub struct TokenCodec {
    access: JwtHandler,
    refresh: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Minimum secret length accepted for HS256 signing.
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a codec from injected configuration.
    ///
    /// # Errors
    /// * `WeakSecret` - Either secret is shorter than [`Self::MIN_SECRET_LENGTH`]
    /// * `InvalidLifetime` - A lifetime is under one second or pushes expiry
    ///   past the representable date range
    pub fn new(config: TokenCodecConfig) -> Result<Self, JwtError> {
        Self::check_secret(&config.access_secret)?;
        Self::check_secret(&config.refresh_secret)?;
        Self::check_lifetime(TokenKind::Access, config.access_ttl)?;
        Self::check_lifetime(TokenKind::Refresh, config.refresh_ttl)?;

        Ok(Self {
            access: JwtHandler::new(config.access_secret.as_bytes()),
            refresh: JwtHandler::new(config.refresh_secret.as_bytes()),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        })
    }

    fn check_secret(secret: &str) -> Result<(), JwtError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(JwtError::WeakSecret {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }
        Ok(())
    }

    fn check_lifetime(kind: TokenKind, ttl: Duration) -> Result<(), JwtError> {
        if ttl.num_seconds() < 1 {
            return Err(JwtError::InvalidLifetime {
                kind,
                reason: format!("must be at least one second, got {}s", ttl.num_seconds()),
            });
        }
        Self::expiry(kind, Utc::now(), ttl).map(|_| ())
    }

    fn expiry(
        kind: TokenKind,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<DateTime<Utc>, JwtError> {
        now.checked_add_signed(ttl)
            .ok_or_else(|| JwtError::InvalidLifetime {
                kind,
                reason: "expiry is out of range".to_string(),
            })
    }

    /// Configured lifetime of a token kind.
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    fn handler(&self, kind: TokenKind) -> &JwtHandler {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Sign a new token of the given kind for an identity.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    /// * `InvalidLifetime` - Expiry falls outside the representable range
    pub fn issue(&self, identity: &Identity, kind: TokenKind) -> Result<IssuedToken, JwtError> {
        self.issue_at(identity, kind, Utc::now())
    }

    /// Sign a new token using an explicit issue instant.
    pub fn issue_at(
        &self,
        identity: &Identity,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let ttl = self.ttl(kind);
        let expires_at = Self::expiry(kind, now, ttl)?;
        let claims = Claims::for_session(identity.user_id, kind, now, expires_at);
        let token = self.handler(kind).encode(&claims)?;

        Ok(IssuedToken {
            token,
            kind,
            expires_at,
            ttl_seconds: ttl.num_seconds(),
        })
    }

    /// Verify a token and recover the identity it was issued for.
    ///
    /// The signature is checked against the secret of the kind the token
    /// declares, so a genuine token of the wrong family is reported as
    /// `WrongTokenKind` rather than `InvalidToken`.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token, bad signature, or unusable subject
    /// * `TokenExpired` - Token `exp` lies in the past
    /// * `WrongTokenKind` - Token is genuine but of the other kind
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Identity, JwtError> {
        let declared = self
            .access
            .decode_unverified::<Claims>(token)?
            .kind
            .ok_or_else(|| JwtError::InvalidToken("missing kind claim".to_string()))?;

        let claims: Claims = self.handler(declared).decode(token)?;

        if declared != expected {
            return Err(JwtError::WrongTokenKind {
                expected,
                actual: declared,
            });
        }

        let subject = claims
            .sub
            .ok_or_else(|| JwtError::InvalidToken("missing sub claim".to_string()))?;
        let user_id = subject
            .parse::<i64>()
            .map_err(|_| JwtError::InvalidToken(format!("subject is not a user id: {}", subject)))?;

        Ok(Identity::new(user_id))
    }
}
