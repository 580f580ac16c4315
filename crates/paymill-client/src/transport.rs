//! # Transport
//!
//! The HTTP boundary. Services build an [`ApiRequest`] and hand it to a
//! [`Transport`]; status classification and JSON parsing happen above this
//! layer, so a transport only moves bytes.

use crate::config::PaymillConfig;
use async_trait::async_trait;
use paymill_core::{Params, PaymillError, PaymillResult};
use reqwest::{Client, Method};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// One outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the API base, e.g. `transactions/tran_1`
    pub path: String,
    pub query: Params,
    /// Form-encoded body; empty means no body
    pub form: Params,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            form: Params::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_query(mut self, query: Params) -> Self {
        self.query.extend(query);
        self
    }

    pub fn with_form(mut self, form: Params) -> Self {
        self.form.extend(form);
        self
    }
}

/// Raw answer: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the API.
///
/// Implement this to plug in a different HTTP stack or a test double.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one round trip. Non-success statuses are returned as
    /// responses, not errors; only network failures are `Err`.
    async fn send(&self, request: ApiRequest) -> PaymillResult<ApiResponse>;
}

/// Type alias for shared transports
pub type SharedTransport = Arc<dyn Transport>;

/// `reqwest` transport with basic auth (API key as user, empty password)
pub struct HttpTransport {
    config: PaymillConfig,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: PaymillConfig) -> PaymillResult<Self> {
        let config = config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                PaymillError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &PaymillConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> PaymillResult<ApiResponse> {
        let url = self.config.endpoint(&request.path);

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .basic_auth(&self.config.api_key, Some(""));

        if !request.query.is_empty() {
            builder = builder.query(request.query.as_pairs());
        }
        if !request.form.is_empty() {
            builder = builder.form(request.form.as_pairs());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PaymillError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PaymillError::Transport(e.to_string()))?;

        debug!("PAYMILL answered {} ({} bytes)", status, body.len());

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::delete("subscriptions/sub_1")
            .with_query(Params::new().with("remove", "true"));

        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.query.get("remove"), Some("true"));
        assert!(request.form.is_empty());
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(Method::from(HttpMethod::Put), Method::PUT);
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_response_success_range() {
        let ok = ApiResponse {
            status: 204,
            body: String::new(),
        };
        let missing = ApiResponse {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }

    #[test]
    fn test_http_transport_validates_config() {
        assert!(matches!(
            HttpTransport::new(PaymillConfig::new("   ")),
            Err(PaymillError::Configuration(_))
        ));
        let transport = HttpTransport::new(PaymillConfig::new("key").with_timeout_secs(3)).unwrap();
        assert_eq!(transport.config().timeout_secs, 3);
    }
}
