//! Error types for OAuth token operations

/// Errors from OAuth token operations.
///
/// Variants carry the numeric HTTP status and raw body text so callers can
/// branch on structure instead of parsing display strings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The token endpoint answered with a non-success status.
    #[error("token refresh failed ({status}): {body}")]
    TokenRefresh { status: u16, body: String },

    /// The token endpoint answered 2xx but the body was not a valid token
    /// response.
    #[error("invalid token response: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    /// Transport-level failure, passed through unclassified.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// HTTP status of the failed token-endpoint response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::TokenRefresh { status, .. } => Some(*status),
            Error::InvalidResponse(_) => None,
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Result alias for OAuth token operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_refresh_display_includes_status_and_body() {
        let err = Error::TokenRefresh {
            status: 400,
            body: r#"{"error":"invalid_grant"}"#.into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("400"), "got: {msg}");
        assert!(msg.contains("invalid_grant"), "got: {msg}");
    }

    #[test]
    fn status_accessor_returns_numeric_status() {
        let err = Error::TokenRefresh {
            status: 403,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(403));
    }
}
