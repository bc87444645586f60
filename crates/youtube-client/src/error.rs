//! Error types for authenticated API requests

/// Errors from one logical API call.
///
/// Variants carry numeric statuses and raw body text so callers branch on
/// structure (`err.status() == Some(403)`) instead of matching display
/// strings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target API answered with a non-success status. After a 401 the
    /// request is retried once with a fresh token; this variant then
    /// reflects the retry's status and body, not the original 401.
    #[error("YouTube API error ({status} {status_text}): {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Refreshing the access token failed; the request was not (re)sent.
    #[error(transparent)]
    TokenRefresh(#[from] youtube_oauth::Error),

    /// The API answered 2xx but the body did not decode as the expected type.
    #[error("invalid response body: {0}")]
    InvalidBody(#[source] reqwest::Error),

    /// The stored access token contains bytes that cannot appear in an HTTP
    /// header value.
    #[error("access token is not a valid header value")]
    InvalidToken(#[source] reqwest::header::InvalidHeaderValue),

    /// Transport-level failure, passed through unclassified.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Numeric HTTP status attached to this error, if a response was
    /// received. `Api` reports the target API's status, `TokenRefresh` the
    /// token endpoint's.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::TokenRefresh(e) => e.status(),
            Error::InvalidBody(_) | Error::InvalidToken(_) => None,
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Result alias for API call operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_display_includes_status_text_and_body() {
        let err = Error::Api {
            status: 403,
            status_text: "Forbidden".into(),
            body: r#"{"error":{"errors":[{"reason":"insufficientPermissions"}]}}"#.into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403 Forbidden"), "got: {msg}");
        assert!(msg.contains("insufficientPermissions"), "got: {msg}");
    }

    #[test]
    fn status_accessor_covers_api_and_refresh_errors() {
        let api = Error::Api {
            status: 500,
            status_text: "Internal Server Error".into(),
            body: String::new(),
        };
        assert_eq!(api.status(), Some(500));

        let refresh = Error::TokenRefresh(youtube_oauth::Error::TokenRefresh {
            status: 400,
            body: String::new(),
        });
        assert_eq!(refresh.status(), Some(400));
    }
}
