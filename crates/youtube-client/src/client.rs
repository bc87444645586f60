//! Authenticated request execution
//!
//! `Client` owns one credential set and performs authenticated calls for
//! the generated endpoint methods: pre-flight refresh when the token is
//! within its expiry margin, bearer header injection, and at most one
//! silent re-authentication when the API answers 401.
//!
//! Credentials live behind a tokio `Mutex` held only to read or replace
//! the token set, never across an HTTP await. Concurrent calls on one
//! client may therefore each observe an expired token and each refresh it;
//! the last refresh to complete wins. Refreshes are not coalesced.

use std::fmt;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use youtube_oauth::{Credentials, GOOGLE_TOKEN_ENDPOINT, now_millis};

use crate::error::{Error, Result};

/// Per-call request shape supplied by a generated endpoint method.
///
/// Stands in for the original transport's request-options bag: method,
/// extra headers, and an optional JSON body. The same value is reused
/// verbatim when a call is retried after a 401, so both attempts are
/// identical apart from the bearer header.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method; GET when constructed via `Default`
    pub method: Method,
    /// Extra headers, merged under the injected auth/content-type headers
    pub headers: HeaderMap,
    /// JSON request body, sent as-is
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    /// GET with no body.
    pub fn get() -> Self {
        Self::default()
    }

    /// POST carrying a JSON body.
    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    /// PUT carrying a JSON body.
    pub fn put(body: serde_json::Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    /// DELETE with no body.
    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    /// Add a header. The injected `Authorization` and `Content-Type`
    /// headers still replace caller-supplied values at send time.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Base client for a generated YouTube Data API client.
///
/// Constructed with an existing credential set and the OAuth client
/// identity; the initial authorization-code exchange never happens here,
/// only refresh. Each client owns its credentials exclusively; clients
/// never share a token set.
pub struct Client {
    http: reqwest::Client,
    token_endpoint: String,
    client_id: String,
    client_secret: String,
    credentials: Mutex<Credentials>,
}

impl Client {
    /// Create a client from an existing (valid or expired) credential set.
    pub fn new(
        credentials: Credentials,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_owned(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            credentials: Mutex::new(credentials),
        }
    }

    /// Override the token endpoint (tests, emulators, corporate proxies).
    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    /// Use a caller-supplied HTTP client, e.g. one shared across clients
    /// or preconfigured with proxy/TLS settings.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Whether the access token needs a refresh (within 5 minutes of its
    /// real expiry). No side effects.
    pub async fn is_token_expired(&self) -> bool {
        self.credentials.lock().await.is_expired_at(now_millis())
    }

    /// A clone of the current credential state, e.g. for persisting after
    /// a refresh may have happened.
    pub async fn get_credentials(&self) -> Credentials {
        self.credentials.lock().await.clone()
    }

    /// Refresh the access token using the stored refresh token and return
    /// the updated credentials.
    ///
    /// The credential lock is released while the token endpoint call is in
    /// flight, so concurrent callers may race; the last write wins.
    pub async fn refresh_access_token(&self) -> Result<Credentials> {
        let refresh_token = self.credentials.lock().await.refresh_token.clone();

        let response = youtube_oauth::refresh_access_token(
            &self.http,
            &self.token_endpoint,
            &self.client_id,
            &self.client_secret,
            &refresh_token,
        )
        .await?;

        let mut credentials = self.credentials.lock().await;
        credentials.apply_refresh(&response, now_millis());
        info!("access token refreshed");
        Ok(credentials.clone())
    }

    /// Perform one logical authenticated call and decode the JSON response
    /// as `T`.
    ///
    /// A 401 on the first attempt triggers one unconditional refresh and
    /// one resend of the identical request; any further failure (including
    /// a second 401) is terminal and carries the final response's status
    /// and body. Non-401 failures are never retried by this layer.
    pub async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T> {
        if self.is_token_expired().await {
            debug!(url, "token within expiry margin, refreshing before request");
            self.refresh_access_token().await?;
        }

        let mut response = self.attempt(url, &options).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Token revoked or invalidated despite the pre-flight check
            warn!(url, "request unauthorized, refreshing token and retrying once");
            self.refresh_access_token().await?;
            response = self.attempt(url, &options).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(Error::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                body,
            });
        }

        response.json::<T>().await.map_err(Error::InvalidBody)
    }

    /// One authenticated send: the caller's options with `Authorization`
    /// and `Content-Type` injected on top. Called once normally, twice
    /// when the first attempt comes back 401.
    async fn attempt(&self, url: &str, options: &RequestOptions) -> Result<reqwest::Response> {
        let access_token = self.credentials.lock().await.access_token.clone();

        let mut bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(Error::InvalidToken)?;
        bearer.set_sensitive(true);

        // Caller headers first; injected headers replace any caller-supplied
        // Authorization/Content-Type
        let mut headers = options.headers.clone();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut request = self
            .http
            .request(options.method.clone(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("token_endpoint", &self.token_endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}
