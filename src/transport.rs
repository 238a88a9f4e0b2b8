//! HTTP transport used to deliver requests to the compute service.
//!
//! The compute client only needs to POST a JSON body with an auth token and
//! read back the raw response, so the transport is a single-method trait.
//! [`HttpTransport`] is the `reqwest` implementation; tests substitute their own.

use std::future::Future;
use std::pin::Pin;
use std::sync::LazyLock;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::warn;

/// Header carrying the bearer token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

static HTTP_CLIENT: LazyLock<reqwest::Client> =
    LazyLock::new(|| build_client(reqwest::Client::builder().timeout(HTTP_TIMEOUT)));

fn build_client(builder: reqwest::ClientBuilder) -> reqwest::Client {
    builder.build().unwrap_or_else(|err| {
        warn!(error = %err, "HTTP client configuration rejected; requests will not time out");
        reqwest::Client::new()
    })
}

/// Unparsed response returned by the provider.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body exactly as received.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Reports whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Errors raised while exchanging a request with the provider.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransportError {
    /// Raised when the request cannot be sent or no response arrives.
    #[error("request to {url} failed: {message}")]
    Request {
        /// Target URL.
        url: String,
        /// Message from the HTTP client.
        message: String,
    },
    /// Raised when the response body cannot be read.
    #[error("failed to read response from {url}: {message}")]
    Body {
        /// Target URL.
        url: String,
        /// Message from the HTTP client.
        message: String,
    },
}

/// Future returned by transport operations.
pub type TransportFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, TransportError>> + Send + 'a>>;

/// Minimal interface for sending JSON requests to the provider.
pub trait Transport {
    /// POSTs `body` to `url` as `application/json`, authenticated with
    /// `auth_token`, and returns the response without interpreting it.
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        auth_token: &'a str,
        body: Vec<u8>,
    ) -> TransportFuture<'a, RawResponse>;
}

/// Transport backed by a shared `reqwest` client with a request timeout.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport that reuses the process-wide HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }

    /// Creates a transport around a caller-configured client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        auth_token: &'a str,
        body: Vec<u8>,
    ) -> TransportFuture<'a, RawResponse> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(AUTH_TOKEN_HEADER, auth_token)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(|err| TransportError::Request {
                    url: url.to_owned(),
                    message: err.to_string(),
                })?;

            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|err| TransportError::Body {
                    url: url.to_owned(),
                    message: err.to_string(),
                })?;

            Ok(RawResponse::new(status, bytes.to_vec()))
        })
    }
}
