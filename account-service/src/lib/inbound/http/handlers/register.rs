use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::session::models::RegisterUserCommand;
use crate::domain::session::models::SessionCookies;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::NicknameError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Nickname;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;

/// Create an account and open a session for it.
pub async fn register<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<UserData>), ApiError> {
    let Json(body) = payload?;
    let user = state.session_service.register(body.try_into_command()?).await?;

    let pair = state.session_service.start_session(&user.identity())?;
    let jar = state
        .cookie_settings
        .apply(jar, SessionCookies::issued(&pair));

    Ok((jar, ApiSuccess::new(StatusCode::CREATED, (&user).into())))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    nickname: String,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid nickname: {0}")]
    Nickname(#[from] NicknameError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let nickname = Nickname::new(self.nickname)?;
        let image = self.image.filter(|image| !image.trim().is_empty());
        Ok(RegisterUserCommand::new(email, password, nickname, image))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
