//! Runtime base for generated YouTube Data API clients
//!
//! Everything a generated endpoint method needs at run time: the
//! authenticated [`Client`] (bearer injection, pre-flight token refresh,
//! single retry on 401) and the [`to_query`] string builder. Generated
//! methods call [`Client::request`] with a full URL and per-call options;
//! they never touch tokens directly.
//!
//! Request flow for one call:
//! 1. Pre-flight: refresh the token if it is within the expiry margin
//! 2. Send with `Authorization: Bearer` and `Content-Type: application/json`
//!    injected over the caller's headers
//! 3. On 401 exactly: refresh unconditionally, resend the same request once
//! 4. Any other non-2xx: structured [`Error::Api`], no retry

pub mod client;
pub mod error;
pub mod query;

pub use client::{Client, RequestOptions};
pub use error::{Error, Result};
pub use query::{QueryValue, to_query};
