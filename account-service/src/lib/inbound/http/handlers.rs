use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::session::errors::SessionError;
use crate::domain::user::models::User;

pub mod get_current_user;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::DuplicateEmail(_)
            | SessionError::InvalidCredentials
            | SessionError::MissingToken
            | SessionError::InvalidToken(_)
            | SessionError::ExpiredToken
            | SessionError::WrongTokenKind { .. } => ApiError::BadRequest(err.to_string()),
            SessionError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            SessionError::Password(_) | SessionError::Signing(_) | SessionError::Storage(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body of responses that only acknowledge an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub image: Option<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            nickname: user.nickname.as_str().to_string(),
            image: user.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordError;
    use auth::TokenKind;

    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let client_errors = [
            SessionError::DuplicateEmail("a@x.com".to_string()),
            SessionError::InvalidCredentials,
            SessionError::MissingToken,
            SessionError::InvalidToken("bad".to_string()),
            SessionError::ExpiredToken,
            SessionError::WrongTokenKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            },
        ];

        for err in client_errors {
            assert!(matches!(ApiError::from(err), ApiError::BadRequest(_)));
        }
    }

    #[test]
    fn test_server_errors_map_to_internal() {
        let err = SessionError::Password(PasswordError::MalformedHash("bad".to_string()));
        assert!(matches!(
            ApiError::from(err),
            ApiError::InternalServerError(_)
        ));
        assert!(matches!(
            ApiError::from(SessionError::Storage("down".to_string())),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_internal_error_status() {
        let response =
            ApiError::InternalServerError("connection string leaked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
