use async_trait::async_trait;
use auth::Identity;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RegisterUserCommand;
use crate::domain::session::models::SessionCookies;
use crate::domain::session::models::TokenPair;
use crate::domain::user::models::User;

/// Port for session lifecycle operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Create a new account.
    ///
    /// # Arguments
    /// * `command` - Validated email, password, nickname and optional image
    ///
    /// # Returns
    /// Created user; its identity is the input to `start_session`
    ///
    /// # Errors
    /// * `DuplicateEmail` - Storage reported a uniqueness conflict
    /// * `Password` - Hashing failed
    /// * `Storage` - Storage operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, SessionError>;

    /// Check credentials.
    ///
    /// # Returns
    /// Identity of the account the credentials belong to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Password` - Stored hash is malformed
    /// * `Storage` - Storage operation failed
    async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError>;

    /// Mint an access/refresh pair for an identity.
    ///
    /// # Errors
    /// * `Signing` - Token signing failed
    fn start_session(&self, identity: &Identity) -> Result<TokenPair, SessionError>;

    /// Exchange a refresh token for a brand-new pair.
    ///
    /// # Arguments
    /// * `refresh_token` - Value of the refresh cookie, if one was sent
    ///
    /// # Errors
    /// * `MissingToken` - No refresh token was presented
    /// * `InvalidToken` / `ExpiredToken` / `WrongTokenKind` - Verification failed
    fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenPair, SessionError>;

    /// Cookie instructions that end the client's session.
    fn end_session(&self) -> SessionCookies;

    /// Load the account behind an authenticated identity.
    ///
    /// # Errors
    /// * `UserNotFound` - The account no longer exists
    /// * `Storage` - Storage operation failed
    async fn current_user(&self, identity: &Identity) -> Result<User, SessionError>;
}
