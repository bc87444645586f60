//! YouTube OAuth endpoint constants
//!
//! Public OAuth2 configuration for the YouTube Data API. These values are
//! not secrets; the client ID/secret pair and the token set itself are
//! supplied by the caller at construction time.

/// Google's OAuth2 token endpoint, used for refresh-token grants
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Safety margin subtracted from a token's expiry when deciding staleness.
///
/// A token counts as expired once the current time is within 5 minutes of
/// its real expiry, so requests never go out with a token about to lapse
/// mid-flight.
pub const EXPIRY_MARGIN_MILLIS: u64 = 300_000;
