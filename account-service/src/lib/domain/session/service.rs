use std::sync::Arc;

use async_trait::async_trait;
use auth::Identity;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenKind;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RegisterUserCommand;
use crate::domain::session::models::SessionCookies;
use crate::domain::session::models::TokenPair;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for session operations.
///
/// Holds no per-user state: every session lives entirely in the tokens it
/// hands out.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    token_codec: Arc<TokenCodec>,
    password_hasher: PasswordHasher,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_codec` - Configured token issuer/verifier
    /// * `password_hasher` - Hasher carrying the configured cost factor
    pub fn new(
        repository: Arc<UR>,
        token_codec: Arc<TokenCodec>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            repository,
            token_codec,
            password_hasher,
        }
    }

    /// Spend one hash evaluation so a rejected login costs the same whether
    /// or not the email exists.
    fn equalize_timing(&self, password: &str) {
        let _ = self.password_hasher.hash(password);
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, SessionError> {
        let password_hash = self.password_hasher.hash(command.password.as_str())?;

        let new_user = NewUser {
            email: command.email,
            nickname: command.nickname,
            image: command.image,
            password_hash,
        };

        let user = self.repository.create(new_user).await.map_err(|e| {
            let err = SessionError::from(e);
            if let SessionError::DuplicateEmail(email) = &err {
                tracing::info!(email = %email, "Registration rejected: email already registered");
            }
            err
        })?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let email = match EmailAddress::new(email.to_string()) {
            Ok(email) => email,
            Err(_) => {
                self.equalize_timing(password);
                return Err(SessionError::InvalidCredentials);
            }
        };

        let user = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.equalize_timing(password);
                tracing::debug!("Login rejected: unknown email");
                return Err(SessionError::InvalidCredentials);
            }
        };

        let is_valid = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                SessionError::from(e)
            })?;

        if !is_valid {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(SessionError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(user.identity())
    }

    fn start_session(&self, identity: &Identity) -> Result<TokenPair, SessionError> {
        let access_token = self.token_codec.issue(identity, TokenKind::Access)?;
        let refresh_token = self.token_codec.issue(identity, TokenKind::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenPair, SessionError> {
        let refresh_token = refresh_token.ok_or(SessionError::MissingToken)?;

        let identity = self
            .token_codec
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                SessionError::from(e)
            })?;

        tracing::debug!(user_id = %identity, "Session rotated");

        self.start_session(&identity)
    }

    fn end_session(&self) -> SessionCookies {
        SessionCookies::cleared()
    }

    async fn current_user(&self, identity: &Identity) -> Result<User, SessionError> {
        let id = UserId::from(*identity);

        self.repository
            .find_by_id(&id)
            .await?
            .ok_or(SessionError::UserNotFound(id.to_string()))
    }
}
