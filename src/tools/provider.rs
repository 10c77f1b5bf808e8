use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::request::ToolRequest;

pub const DEFAULT_BASE_URL: &str = "https://api.search1api.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved provider configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: Url,
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(StatusCode),

    #[error("malformed provider response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("provider response has no '{0}' field")]
    MissingField(&'static str),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Request(e) if e.is_timeout())
    }
}

/// Client for the upstream search API.
///
/// Holds no per-call state: each [`ProviderClient::call`] issues exactly one
/// POST and every request/response it creates is dropped before it returns.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    settings: ProviderSettings,
    timeout: Duration,
}

impl ProviderClient {
    pub fn new(client: Client, settings: ProviderSettings) -> Self {
        Self {
            client,
            settings,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.settings.base_url.as_str().trim_end_matches('/'), endpoint)
    }

    /// Sends `request` to its endpoint and returns the payload field of the
    /// response (`results`, or `links` for sitemaps).
    pub async fn call(&self, request: &ToolRequest) -> Result<Value, ProviderError> {
        let kind = request.kind();
        let resp = self
            .client
            .post(self.endpoint_url(kind.endpoint()))
            .bearer_auth(&self.settings.api_key)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body: Value = resp.json().await.map_err(ProviderError::Decode)?;
        take_field(body, kind.result_field())
    }
}

fn take_field(mut body: Value, field: &'static str) -> Result<Value, ProviderError> {
    match body.get_mut(field).map(Value::take) {
        Some(Value::Null) | None => Err(ProviderError::MissingField(field)),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::request::{SearchArgs, UrlArgs};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> ProviderClient {
        let settings = ProviderSettings::new("test-key", Url::parse(&server.uri()).unwrap());
        ProviderClient::new(Client::new(), settings)
    }

    fn search(query: &str) -> ToolRequest {
        ToolRequest::Search(SearchArgs {
            query: query.into(),
            max_results: 10,
            search_service: "google".to_string(),
        })
    }

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        let settings = ProviderSettings::new("k", Url::parse("https://api.search1api.com/").unwrap());
        let client = ProviderClient::new(Client::new(), settings);
        assert_eq!(client.endpoint_url("/news"), "https://api.search1api.com/news");
    }

    #[tokio::test]
    async fn posts_authenticated_json_and_returns_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({ "query": "rust", "max_results": 10, "search_service": "google" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "searchParameters": { "query": "rust" },
                "results": [{ "title": "Rust", "link": "https://www.rust-lang.org" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let results = provider(&server).call(&search("rust")).await.unwrap();
        assert_eq!(results, json!([{ "title": "Rust", "link": "https://www.rust-lang.org" }]));
    }

    #[tokio::test]
    async fn sitemap_reads_links_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sitemap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "links": ["https://a", "https://b"] })))
            .mount(&server)
            .await;

        let req = ToolRequest::Sitemap(UrlArgs { url: "https://a".into() });
        let links = provider(&server).call(&req).await.unwrap();
        assert_eq!(links, json!(["https://a", "https://b"]));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = provider(&server).call(&search("q")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status(s) if s == StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn missing_results_field_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let err = provider(&server).call(&search("q")).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingField("results")));
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider(&server).call(&search("q")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "results": [] }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = provider(&server)
            .with_timeout(Duration::from_millis(50))
            .call(&search("q"))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn null_payload_counts_as_missing() {
        let err = take_field(json!({ "results": null }), "results").unwrap_err();
        assert!(matches!(err, ProviderError::MissingField("results")));
        assert_eq!(take_field(json!({ "results": [] }), "results").unwrap(), json!([]));
    }
}
