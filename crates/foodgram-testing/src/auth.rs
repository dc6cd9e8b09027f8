//! Mock auth helpers for integration tests.
//!
//! `MockAuth` mints a real signed token for a fixed user id so requests pass
//! through the same `Identity` extractor as production traffic.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use foodgram_auth_types::token::issue_token;

/// Token lifetime used for test requests.
const TEST_TOKEN_TTL_SECS: u64 = 3600;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: i32,
    secret: String,
}

impl MockAuth {
    pub fn new(user_id: i32, secret: impl Into<String>) -> Self {
        Self {
            user_id,
            secret: secret.into(),
        }
    }

    /// Signed token for this identity.
    pub fn token(&self) -> String {
        issue_token(self.user_id, &self.secret, TEST_TOKEN_TTL_SECS)
            .expect("test token must sign")
    }

    /// `Authorization: Token <jwt>` as a header pair.
    pub fn authorization(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Token {}", self.token()))
            .expect("token is a valid header value");
        (AUTHORIZATION, value)
    }

    /// Return headers carrying the auth token.
    pub fn headers(&self) -> HeaderMap {
        let (name, value) = self.authorization();
        let mut map = HeaderMap::new();
        map.insert(name, value);
        map
    }
}
