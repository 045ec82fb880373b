// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTPS transport for the SwitchBot cloud API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use crate::error::ProtocolError;
use crate::protocol::{AuthHeaders, Credentials, Transport};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for the HTTPS transport.
///
/// HTTP is stateless - each call is an independent signed request. The
/// config only holds the credentials and where to send requests.
///
/// # Examples
///
/// ```
/// use switchbot_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("my-token", "my-secret")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.endpoint_prefix(), "https://api.switch-bot.com/v1.1");
///
/// // Point at a test double
/// let config = HttpConfig::new("my-token", "my-secret")
///     .with_base_url("http://127.0.0.1:8080/");
/// assert_eq!(config.endpoint_prefix(), "http://127.0.0.1:8080/v1.1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    credentials: Credentials,
    base_url: String,
    api_version: String,
    timeout: Duration,
    verbose: bool,
}

impl HttpConfig {
    /// Production endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.switch-bot.com";
    /// API version path segment.
    pub const DEFAULT_API_VERSION: &'static str = "v1.1";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the production endpoint.
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(token, secret),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            verbose: false,
        }
    }

    /// Overrides the base URL (scheme and host, without version).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the versioned path prefix.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into().trim_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Traces raw response bodies at debug level.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether raw bodies are traced.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Returns `<base_url>/<api_version>`.
    #[must_use]
    pub fn endpoint_prefix(&self) -> String {
        format!("{}/{}", self.base_url, self.api_version)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not http(s) or the HTTP client cannot
    /// be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            prefix: self.endpoint_prefix(),
            client,
            credentials: self.credentials,
            verbose: self.verbose,
        })
    }
}

// ============================================================================
// HttpClient - Signed reqwest transport
// ============================================================================

/// Signed HTTPS transport.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    prefix: String,
    client: Client,
    credentials: Credentials,
    verbose: bool,
}

impl HttpClient {
    /// Creates a transport for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(token, secret).into_client()
    }

    /// Returns the versioned URL prefix requests are sent to.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.prefix)
    }

    fn signed(&self, request: RequestBuilder) -> Result<RequestBuilder, ProtocolError> {
        let headers = AuthHeaders::generate(&self.credentials)?;
        Ok(headers
            .pairs()
            .into_iter()
            .fold(request, |request, (name, value)| request.header(name, value)))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ProtocolError> {
        let response = self
            .signed(request)?
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            tracing::debug!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "Request rejected"
            );
            let reason = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.bytes().await.map_err(ProtocolError::Http)?;

        if self.verbose {
            tracing::debug!(body = %String::from_utf8_lossy(&body), "Received HTTP response");
        }

        Ok(body.to_vec())
    }
}

/// Envelope fields the service still sends alongside an error status.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Extracts the service's message from an error response body.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|error| error.message)
        .filter(|message| !message.trim().is_empty())
}

impl Transport for HttpClient {
    async fn get(&self, path: &str) -> Result<Vec<u8>, ProtocolError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending GET request");
        self.execute(self.client.get(&url)).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, ProtocolError> {
        let url = self.url(path);
        tracing::debug!(url = %url, bytes = body.len(), "Sending POST request");
        let request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=utf8")
            .body(body);
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_from_envelope() {
        assert_eq!(
            error_message(br#"{"statusCode":190,"message":"Device internal error"}"#).as_deref(),
            Some("Device internal error")
        );
        assert_eq!(error_message(br#"{"statusCode":190,"message":" "}"#), None);
        assert_eq!(error_message(b"<html>Bad Gateway</html>"), None);
        assert_eq!(error_message(b""), None);
    }

    #[test]
    fn config_default_values() {
        let config = HttpConfig::new("token", "secret");
        assert_eq!(config.base_url(), "https://api.switch-bot.com");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.verbose());
        assert_eq!(config.credentials().token(), "token");
    }

    #[test]
    fn config_trims_slashes() {
        let config = HttpConfig::new("token", "secret")
            .with_base_url("http://localhost:9000/")
            .with_api_version("/v1.0/");
        assert_eq!(config.endpoint_prefix(), "http://localhost:9000/v1.0");
    }

    #[test]
    fn config_builder_chain() {
        let config = HttpConfig::new("token", "secret")
            .with_timeout(Duration::from_secs(3))
            .with_verbose(true);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.verbose());
    }

    #[test]
    fn into_client_rejects_bad_scheme() {
        let result = HttpConfig::new("token", "secret")
            .with_base_url("ftp://example.com")
            .into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn client_url_joins_prefix() {
        let client = HttpClient::new("token", "secret").unwrap();
        assert_eq!(client.url("/devices"), "https://api.switch-bot.com/v1.1/devices");
    }
}
