use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::session::models::SessionCookies;
use crate::domain::session::models::REFRESH_TOKEN_COOKIE;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::cookies::cookie_value;
use crate::inbound::http::router::AppState;

/// Exchange the refresh cookie for a new token pair.
pub async fn refresh<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    let pair = state
        .session_service
        .refresh(cookie_value(&jar, REFRESH_TOKEN_COOKIE))?;

    let jar = state
        .cookie_settings
        .apply(jar, SessionCookies::issued(&pair));

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, MessageData::new("Session refreshed")),
    ))
}
