//! Authentication utilities library
//!
//! Provides the session authentication primitives used by the account service:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT encoding and validation
//! - A token codec issuing and verifying access/refresh tokens
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Identity, TokenCodec, TokenCodecConfig, TokenKind};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(TokenCodecConfig {
//!     access_secret: "access_secret_key_at_least_32_bytes!".to_string(),
//!     refresh_secret: "refresh_secret_key_at_least_32_bytes".to_string(),
//!     access_ttl: Duration::minutes(15),
//!     refresh_ttl: Duration::days(14),
//! })
//! .unwrap();
//!
//! let identity = Identity::new(42);
//! let refresh = codec.issue(&identity, TokenKind::Refresh).unwrap();
//!
//! assert_eq!(codec.verify(&refresh.token, TokenKind::Refresh).unwrap(), identity);
//! assert!(codec.verify(&refresh.token, TokenKind::Access).is_err());
//! ```

pub mod codec;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use codec::IssuedToken;
pub use codec::TokenCodec;
pub use codec::TokenCodecConfig;
pub use identity::Identity;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
