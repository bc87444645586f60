//! Token refresh against the Google OAuth2 token endpoint
//!
//! One operation: exchanging a refresh token for a new access token. The
//! initial authorization-code exchange is out of scope: clients are
//! constructed with an existing token set and only ever refresh it.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Successful response body from the token endpoint.
///
/// `expires_in` is a delta in seconds from the response time. The caller
/// converts it to an absolute unix millisecond timestamp when updating
/// stored credentials. Google omits `scope`/`token_type` in some refresh
/// responses, so both are optional; they are decoded but never overwrite
/// the stored values.
#[derive(Debug, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    /// Seconds until the new access token expires (delta, not absolute)
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Exchange a refresh token for a new access token.
///
/// POSTs a form-encoded `grant_type=refresh_token` request to
/// `token_endpoint`, normally [`crate::GOOGLE_TOKEN_ENDPOINT`]; the
/// parameter lets tests and proxies redirect it.
///
/// Non-success responses become [`Error::TokenRefresh`] carrying the status
/// and raw body text. Transport failures propagate unwrapped.
pub async fn refresh_access_token(
    http: &reqwest::Client,
    token_endpoint: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<TokenRefreshResponse> {
    debug!(token_endpoint, "refreshing access token");

    let response = http
        .post(token_endpoint)
        .form(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        return Err(Error::TokenRefresh {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<TokenRefreshResponse>()
        .await
        .map_err(Error::InvalidResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GOOGLE_TOKEN_ENDPOINT;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn token_response_deserializes_full() {
        let json = r#"{"access_token":"at_abc","expires_in":3599,"scope":"s1 s2","token_type":"Bearer"}"#;
        let token: TokenRefreshResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "at_abc");
        assert_eq!(token.expires_in, 3599);
        assert_eq!(token.scope.as_deref(), Some("s1 s2"));
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn token_response_deserializes_without_optional_fields() {
        let json = r#"{"access_token":"at_abc","expires_in":3600}"#;
        let token: TokenRefreshResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "at_abc");
        assert!(token.scope.is_none());
        assert!(token.token_type.is_none());
    }

    #[test]
    fn refresh_uses_google_endpoint() {
        assert_eq!(GOOGLE_TOKEN_ENDPOINT, "https://oauth2.googleapis.com/token");
    }

    #[tokio::test]
    async fn refresh_posts_form_encoded_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("client_id=cid-123"))
            .and(body_string_contains("client_secret=cs-456"))
            .and(body_string_contains("refresh_token=rt_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "at_new",
                "expires_in": 3600,
                "scope": "https://www.googleapis.com/auth/youtube",
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let endpoint = format!("{}/token", server.uri());
        let token = refresh_access_token(&http, &endpoint, "cid-123", "cs-456", "rt_1")
            .await
            .unwrap();

        assert_eq!(token.access_token, "at_new");
        assert_eq!(token.expires_in, 3600);
    }

    #[tokio::test]
    async fn refresh_failure_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#),
            )
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let endpoint = format!("{}/token", server.uri());
        let err = refresh_access_token(&http, &endpoint, "cid", "cs", "rt_bad")
            .await
            .unwrap_err();

        match err {
            Error::TokenRefresh { status, ref body } => {
                assert_eq!(status, 400);
                assert!(body.contains("invalid_grant"), "body: {body}");
            }
            other => panic!("expected TokenRefresh, got {other:?}"),
        }
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn refresh_rejects_undecodable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let endpoint = format!("{}/token", server.uri());
        let err = refresh_access_token(&http, &endpoint, "cid", "cs", "rt_1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidResponse(_)), "got {err:?}");
        assert_eq!(err.status(), None);
    }
}
