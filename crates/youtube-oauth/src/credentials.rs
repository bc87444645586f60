//! OAuth credential state for a single client
//!
//! A `Credentials` value is owned by exactly one client instance and
//! replaced wholesale on every refresh; two clients never share a token
//! set. `expires_at` is an absolute unix timestamp in milliseconds,
//! computed at refresh time from the token endpoint's `expires_in` seconds
//! delta plus the current time.

use serde::{Deserialize, Serialize};

use crate::constants::EXPIRY_MARGIN_MILLIS;
use crate::token::TokenRefreshResponse;

/// A full OAuth2 token set for the YouTube Data API.
///
/// Field names match the wire format, so credential JSON captured from an
/// authorization-code flow (or persisted by earlier runs) deserializes
/// as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token sent on every API call
    pub access_token: String,
    /// Long-lived token exchanged for new access tokens
    pub refresh_token: String,
    /// Expiration as unix timestamp in milliseconds (absolute, not a delta)
    pub expires_at: u64,
    /// Space-delimited scopes granted to this token set
    pub scope: String,
    /// Token type, in practice always "Bearer"
    pub token_type: String,
}

impl Credentials {
    /// Whether the access token needs a refresh at `now_millis`.
    ///
    /// True once the clock is within [`EXPIRY_MARGIN_MILLIS`] of the real
    /// expiry. Pure function of the stored state and the given clock, no
    /// side effects.
    pub fn is_expired_at(&self, now_millis: u64) -> bool {
        now_millis >= self.expires_at.saturating_sub(EXPIRY_MARGIN_MILLIS)
    }

    /// Apply a successful refresh response.
    ///
    /// Replaces the access token and recomputes
    /// `expires_at = now + expires_in * 1000`. `refresh_token`, `scope`
    /// and `token_type` keep their prior values; the refresh response's
    /// optional copies of those fields are not applied.
    pub fn apply_refresh(&mut self, response: &TokenRefreshResponse, now_millis: u64) {
        self.access_token = response.access_token.clone();
        self.expires_at = now_millis + response.expires_in * 1000;
    }
}

/// Current unix time in milliseconds.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
