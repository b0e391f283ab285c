use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::CookieSettings;
use super::handlers::get_current_user::get_current_user;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::middleware::require_identity;
use super::middleware::resolve_identity;
use crate::domain::session::ports::SessionServicePort;

pub struct AppState<S: SessionServicePort> {
    pub session_service: Arc<S>,
    pub token_codec: Arc<TokenCodec>,
    pub cookie_settings: CookieSettings,
}

impl<S: SessionServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            session_service: Arc::clone(&self.session_service),
            token_codec: Arc::clone(&self.token_codec),
            cookie_settings: self.cookie_settings.clone(),
        }
    }
}

pub fn create_router<S: SessionServicePort>(
    session_service: Arc<S>,
    token_codec: Arc<TokenCodec>,
    cookie_settings: CookieSettings,
) -> Router {
    let state = AppState {
        session_service,
        token_codec,
        cookie_settings,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register::<S>))
        .route("/api/auth/login", post(login::<S>))
        .route("/api/auth/logout", post(logout::<S>))
        .route("/api/auth/refresh", post(refresh::<S>));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user::<S>))
        .route_layer(middleware::from_fn(require_identity));

    // Headers are left out of the span: they carry session cookies
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity::<S>,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
