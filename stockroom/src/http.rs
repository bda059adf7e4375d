//! HTTP client abstraction for talking to the inventory service.
//!
//! This module defines the `HttpClient` trait to abstract request execution,
//! so the controller can be driven against a recording mock in tests.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;
use url::Url;

/// A request against the inventory service, relative to its base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path including the leading slash (e.g. "/api/products")
    pub path: String,
    /// JSON body, sent with `Content-Type: application/json`
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }

    /// Build a request carrying a JSON-encoded body.
    pub fn with_json<T: serde::Serialize>(method: Method, path: impl Into<String>, body: &T) -> Result<Self> {
        Ok(Self {
            method,
            path: path.into(),
            body: Some(serde_json::to_string(body)?),
        })
    }

    /// Key used to match canned mock responses, e.g. "PATCH /api/products/7/quantity".
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Response from an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an `Http` error.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Http {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Trait for executing HTTP requests.
///
/// Implementations return `Ok` for any response the service produced, whatever
/// its status; only transport failures are errors at this layer.
#[async_trait]
pub trait HttpClient: Send + Sync + Clone {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl ReqwestHttpClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout: None,
        }
    }

    /// Apply a per-request timeout. Without one a request may wait forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        let url = self.url_for(&request.path);

        tracing::debug!(url = %url, "Executing HTTP request");

        let mut req = self.client.request(request.method.clone(), &url);

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = &request.body {
            req = req.header("Content-Type", "application/json").body(body.clone());
            tracing::trace!(body_len = body.len(), "Added request body");
        }

        let response = req.send().await.map_err(|e| {
            tracing::debug!(url = %url, error = %e, "HTTP request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status = status, response_len = body.len(), "HTTP request completed");

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock HTTP client for testing.
///
/// Responses are queued per "{method} {path}" key and handed out in FIFO
/// order; every call is recorded whether or not a response was configured.
///
/// # Example
/// ```
/// use stockroom::http::{HttpResponse, MockHttpClient};
///
/// let mock = MockHttpClient::new();
/// mock.add_response("GET /api/products", Ok(HttpResponse::ok("[]")));
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Vec<Result<HttpResponse>>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// Record of a call made to the mock HTTP client.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub method: String,
    pub path: String,
    pub body: Option<String>,
}

impl MockCall {
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Parse the recorded body as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predetermined response for a specific method and path.
    pub fn add_response(&self, key: &str, response: Result<HttpResponse>) {
        self.responses.lock().entry(key.to_string()).or_default().push(response);
    }

    /// Shorthand for a 200 response carrying a JSON body.
    pub fn add_json(&self, key: &str, body: serde_json::Value) {
        self.add_response(key, Ok(HttpResponse::ok(body.to_string())));
    }

    /// Shorthand for a bare status response.
    pub fn add_status(&self, key: &str, status: u16) {
        self.add_response(
            key,
            Ok(HttpResponse {
                status,
                body: String::new(),
            }),
        );
    }

    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Number of calls recorded for a "{method} {path}" key.
    pub fn calls_to(&self, key: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.key() == key).count()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        self.calls.lock().push(MockCall {
            method: request.method.to_string(),
            path: request.path.clone(),
            body: request.body.clone(),
        });

        let key = request.key();
        let mut responses = self.responses.lock();

        if let Some(queue) = responses.get_mut(&key)
            && !queue.is_empty()
        {
            return queue.remove(0);
        }

        Err(ClientError::Other(anyhow::anyhow!("No mock response configured for {key}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_mock_client_basic() {
        let mock = MockHttpClient::new();
        mock.add_response("POST /api/products", Ok(HttpResponse::ok("{}")));

        let request = ApiRequest::with_json(Method::POST, "/api/products", &serde_json::json!({"name": "Milk"})).unwrap();
        let response = mock.execute(&request).await.unwrap();
        assert_eq!(response.status, 200);

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "/api/products");
        assert_eq!(calls[0].json().unwrap()["name"], "Milk");
    }

    #[tokio::test]
    async fn test_mock_client_multiple_responses() {
        let mock = MockHttpClient::new();
        mock.add_response("GET /api/dashboard", Ok(HttpResponse::ok("first")));
        mock.add_response("GET /api/dashboard", Ok(HttpResponse::ok("second")));

        let request = ApiRequest::get("/api/dashboard");
        assert_eq!(mock.execute(&request).await.unwrap().body, "first");
        assert_eq!(mock.execute(&request).await.unwrap().body, "second");
        assert_eq!(mock.calls_to("GET /api/dashboard"), 2);
    }

    #[tokio::test]
    async fn test_mock_client_no_response() {
        let mock = MockHttpClient::new();
        let result = mock.execute(&ApiRequest::delete("/api/products/3")).await;
        assert!(result.is_err());
        // Unanswered calls are still recorded
        assert_eq!(mock.calls_to("DELETE /api/products/3"), 1);
    }

    #[test]
    fn test_error_for_status() {
        assert!(HttpResponse::ok("").error_for_status().is_ok());

        let err = HttpResponse {
            status: 500,
            body: "boom".to_string(),
        }
        .error_for_status()
        .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_reqwest_client_sends_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/api/products/7/quantity"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({"change": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ReqwestHttpClient::new(mock_server.uri().parse().unwrap());
        let request =
            ApiRequest::with_json(Method::PATCH, "/api/products/7/quantity", &serde_json::json!({"change": 1})).unwrap();
        let response = client.execute(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.body.contains("ok"));
    }

    #[tokio::test]
    async fn test_reqwest_client_returns_error_statuses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/products/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ReqwestHttpClient::new(mock_server.uri().parse().unwrap());
        let response = client.execute(&ApiRequest::delete("/api/products/9")).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_reqwest_client_network_failure() {
        // Grab a free port and release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = ReqwestHttpClient::new(format!("http://127.0.0.1:{port}").parse().unwrap())
            .with_timeout(Some(Duration::from_secs(2)));
        let err = client.execute(&ApiRequest::get("/api/products")).await.unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_url_join_ignores_trailing_slash() {
        let client = ReqwestHttpClient::new("http://localhost:5000/".parse().unwrap());
        assert_eq!(client.url_for("/api/products"), "http://localhost:5000/api/products");
    }
}
