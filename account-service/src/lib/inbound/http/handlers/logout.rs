use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::ApiSuccess;
use super::MessageData;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

/// Clear both session cookies.
///
/// Issued tokens stay valid until they expire; only the client forgets them.
pub async fn logout<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<MessageData>) {
    let jar = state
        .cookie_settings
        .apply(jar, state.session_service.end_session());

    (
        jar,
        ApiSuccess::new(StatusCode::OK, MessageData::new("Logged out")),
    )
}
