use std::sync::Arc;

use account_service::domain::session::service::SessionService;
use account_service::inbound::http::cookies::CookieSettings;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenCodecConfig;
use axum_extra::extract::cookie::SameSite;
use serde_json::json;
use serde_json::Value;

pub const ACCESS_SECRET: &str = "test-access-secret-key-at-least-32-bytes";
pub const REFRESH_SECRET: &str = "test-refresh-secret-key-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    /// Client with a cookie store, behaves like a browser session
    pub api_client: reqwest::Client,
    /// Client without a cookie store, for inspecting raw `Set-Cookie` headers
    pub raw_client: reqwest::Client,
    pub token_codec: Arc<TokenCodec>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_codec = Arc::new(
            TokenCodec::new(TokenCodecConfig {
                access_secret: ACCESS_SECRET.to_string(),
                refresh_secret: REFRESH_SECRET.to_string(),
                access_ttl: chrono::Duration::minutes(15),
                refresh_ttl: chrono::Duration::days(14),
            })
            .expect("Failed to create token codec"),
        );

        // Minimum viable cost keeps the suite fast
        let password_hasher =
            PasswordHasher::with_cost(1024, 1, 1).expect("Failed to create password hasher");

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let session_service = Arc::new(SessionService::new(
            user_repo,
            Arc::clone(&token_codec),
            password_hasher,
        ));

        // Plain http: a Secure cookie would never be sent back by the client
        let cookie_settings = CookieSettings {
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        };

        let router = create_router(session_service, Arc::clone(&token_codec), cookie_settings);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            raw_client: reqwest::Client::new(),
            token_codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request without the cookie store
    pub fn post_raw(&self, path: &str) -> reqwest::RequestBuilder {
        self.raw_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request without the cookie store
    pub fn get_raw(&self, path: &str) -> reqwest::RequestBuilder {
        self.raw_client.get(&format!("{}{}", self.address, path))
    }

    /// Register a user through the API and return the response
    pub async fn register(&self, email: &str, password: &str, nickname: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({
                "email": email,
                "password": password,
                "nickname": nickname
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in through the raw client and return the response
    pub async fn login_raw(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_raw("/api/auth/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// All `Set-Cookie` header values of a response
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `Set-Cookie` header for the named cookie
pub fn set_cookie(response: &reqwest::Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.starts_with(&prefix))
}

/// The value part of a `Set-Cookie` header
pub fn cookie_value(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value.to_string())
        .unwrap_or_default()
}

/// Read the `message` field of an error body
pub async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse response");
    body["message"]
        .as_str()
        .expect("Error body has no message")
        .to_string()
}
