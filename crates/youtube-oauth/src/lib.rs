//! YouTube OAuth2 credential management
//!
//! Token lifecycle for generated YouTube Data API clients: the owned
//! [`Credentials`] set, time-based expiry with a safety margin, and refresh
//! against Google's token endpoint. This crate is a standalone library with
//! no knowledge of the request layer; `youtube-client` drives it.
//!
//! Credential flow:
//! 1. Caller constructs a client with an existing `Credentials` set
//!    (valid or expired; initial authorization is never performed here)
//! 2. `Credentials::is_expired_at()` flags staleness 5 minutes early
//! 3. `token::refresh_access_token()` exchanges the refresh token
//! 4. `Credentials::apply_refresh()` installs the new access token and expiry

pub mod constants;
pub mod credentials;
pub mod error;
pub mod token;

pub use constants::*;
pub use credentials::{Credentials, now_millis};
pub use error::{Error, Result};
pub use token::{TokenRefreshResponse, refresh_access_token};
