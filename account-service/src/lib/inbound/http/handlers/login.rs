use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::SessionCookies;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    payload: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let Json(body) = payload?;

    // Unknown email and wrong password share one error on purpose
    let identity = state
        .session_service
        .login(&body.email, &body.password)
        .await?;

    let pair = state.session_service.start_session(&identity)?;
    let jar = state
        .cookie_settings
        .apply(jar, SessionCookies::issued(&pair));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                id: identity.user_id,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: i64,
}
