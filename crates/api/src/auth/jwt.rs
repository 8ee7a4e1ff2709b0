//! Signed access tokens.
//!
//! A token is an HS256 JWT naming the user and the account's `token_version`
//! at the time it was issued. Role and account state are read from the
//! database on every request (see [`crate::middleware::auth`]), so logging out
//! only has to bump the stored version.

use std::fmt;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roombook_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Default token lifetime: one working day.
pub const DEFAULT_TOKEN_TTL_MINS: i64 = 8 * 60;

/// Payload of every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// `users.token_version` when the token was issued.
    pub ver: i32,
    pub iat: i64,
    pub exp: i64,
}

/// Signing secret and token lifetime.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_mins: i64,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl_mins", &self.ttl_mins)
            .finish()
    }
}

impl TokenConfig {
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `JWT_SECRET`   | **yes**  | --      |
    /// | `JWT_TTL_MINS` | no       | `480`   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or `JWT_TTL_MINS` is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let ttl_mins: i64 = std::env::var("JWT_TTL_MINS")
            .map(|raw| raw.parse().expect("JWT_TTL_MINS must be a valid i64"))
            .unwrap_or(DEFAULT_TOKEN_TTL_MINS);
        assert!(ttl_mins > 0, "JWT_TTL_MINS must be greater than zero");

        Self { secret, ttl_mins }
    }

    /// Token lifetime in seconds, as reported to clients in `expires_in`.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_mins * 60
    }

    /// Sign a token for `user_id` at the account's current `token_version`.
    pub fn issue(
        &self,
        user_id: DbId,
        token_version: i32,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            ver: token_version,
            iat: now,
            exp: now + self.ttl_secs(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature and expiry. Whether the version is still current is
    /// up to the caller.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
    }
}
