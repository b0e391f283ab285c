use auth::Identity;
use auth::TokenKind;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::session::models::ACCESS_TOKEN_COOKIE;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::cookies::cookie_value;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub identity: Identity,
}

/// Middleware that resolves the access-token cookie into an identity.
///
/// Never rejects: a missing, expired or invalid token leaves the request
/// unauthenticated and lets it through. Expired access tokens are not
/// refreshed here; clients call the refresh endpoint themselves.
pub async fn resolve_identity<S: SessionServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    if let Some(token) = cookie_value(&jar, ACCESS_TOKEN_COOKIE) {
        match state.token_codec.verify(token, TokenKind::Access) {
            Ok(identity) => {
                tracing::debug!(user_id = %identity, "Request authenticated");
                req.extensions_mut().insert(AuthenticatedUser { identity });
            }
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected, continuing unauthenticated");
            }
        }
    }

    next.run(req).await
}

/// Guard for routes that need an identity.
pub async fn require_identity(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<AuthenticatedUser>().is_none() {
        return Err(ApiError::Unauthorized(
            "Authentication required".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
