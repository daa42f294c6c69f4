//! Bearer-token checks for the bulk sync endpoint.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential parsing and comparison here.

use std::fmt;

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;
use zeroize::Zeroizing;

use crate::domain::Error;

use super::ApiResult;

const BEARER_PREFIX: &str = "Bearer ";

/// Shared secret expected in `Authorization: Bearer <token>`.
///
/// The value is wiped on drop and never printed.
#[derive(Clone)]
pub struct SyncSecret(Zeroizing<String>);

impl SyncSecret {
    /// Wrap a configured secret. Blank values yield `None` so an empty
    /// environment variable behaves like an unset one.
    pub fn new(secret: Zeroizing<String>) -> Option<Self> {
        if secret.trim().is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    fn matches(&self, token: &str) -> bool {
        let expected = self.0.as_bytes();
        let presented = token.as_bytes();
        expected.len() == presented.len()
            && expected
                .iter()
                .zip(presented)
                .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl fmt::Debug for SyncSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SyncSecret(<redacted>)")
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme must be exactly `Bearer` followed by one space.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}

/// Check the request's bearer token against the configured secret.
///
/// # Errors
/// - `not_configured` when no secret is set.
/// - `unauthorized` when the header is missing, malformed or wrong.
pub fn authorize_sync(secret: Option<&SyncSecret>, request: &HttpRequest) -> ApiResult<()> {
    let Some(secret) = secret else {
        return Err(Error::not_configured("sync secret is not configured"));
    };
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);
    match token {
        Some(token) if secret.matches(token) => Ok(()),
        _ => Err(Error::unauthorized("missing or invalid bearer token")),
    }
}
