//! Access token inspection.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// Lifetime given to tokens whose expiry cannot be read (seven days).
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Deserialize)]
struct JwtClaims {
    exp: i64,
}

/// Read the `exp` claim of a JWT as a Unix timestamp.
///
/// The signature is not verified; this only decides when to ask the user to
/// log in again. Returns `None` for anything that is not a JWT with `exp`.
pub fn jwt_expires_at(access_token: &str) -> Option<i64> {
    let payload = access_token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: JwtClaims = serde_json::from_slice(&decoded).ok()?;
    Some(claims.exp)
}

/// Expiry for a freshly issued token
pub fn expires_at_for(access_token: &str) -> i64 {
    jwt_expires_at(access_token)
        .unwrap_or_else(|| chrono::Utc::now().timestamp() + DEFAULT_TOKEN_LIFETIME_SECS)
}
