//! Remote quote client for the mock REST endpoint.
//!
//! `GET` lists posts that are adapted into `Server` quotes; `POST` pushes the
//! local collection and returns whatever the endpoint echoes back.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use std::time::Duration;

use quotebook_core::errors::FetchError;
use quotebook_core::quotes::{Quote, QuoteFetcher};

use crate::error::{RemoteError, Result};
use crate::types::RemotePost;

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the remote quote endpoint.
#[derive(Debug, Clone)]
pub struct RemoteQuoteClient {
    client: reqwest::Client,
    url: String,
    limit: usize,
}

impl RemoteQuoteClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `url` - The collection URL (e.g., "https://jsonplaceholder.typicode.com/posts")
    /// * `limit` - Maximum number of posts taken per fetch
    /// * `timeout` - Per-request timeout
    pub fn new(url: &str, limit: usize, timeout: Duration) -> Result<Self> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RemoteError::invalid_config(format!(
                "server URL must be http(s): '{}'",
                url
            )));
        }
        if limit == 0 {
            return Err(RemoteError::invalid_config("fetch limit must be at least 1"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(Self::headers())
            .build()?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            limit,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Remote response ({}): {} bytes", status, body.len());

        if !status.is_success() {
            return Err(RemoteError::api(
                status.as_u16(),
                format!("Request failed: {}", body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to deserialize response. Body: {}, Error: {}", body, e);
            RemoteError::Json(e)
        })
    }

    /// List the raw posts.
    ///
    /// GET {url}
    pub async fn list_posts(&self) -> Result<Vec<RemotePost>> {
        let response = self.client.get(&self.url).send().await?;
        Self::parse_response(response).await
    }

    /// Fetch at most `limit` posts adapted to quotes.
    ///
    /// The limit applies to the posts as listed; posts without a title are
    /// then dropped.
    pub async fn fetch_server_quotes(&self) -> Result<Vec<Quote>> {
        let posts = self.list_posts().await?;
        let total = posts.len();
        let quotes: Vec<Quote> = posts
            .into_iter()
            .take(self.limit)
            .filter_map(RemotePost::into_quote)
            .collect();
        debug!("Adapted {} of {} remote posts", quotes.len(), total);
        Ok(quotes)
    }

    /// Push the local collection.
    ///
    /// POST {url}
    pub async fn push(&self, quotes: &[Quote]) -> Result<Value> {
        debug!("Pushing {} quotes to {}", quotes.len(), self.url);
        let response = self.client.post(&self.url).json(quotes).send().await?;
        Self::parse_response(response).await
    }
}

#[async_trait]
impl QuoteFetcher for RemoteQuoteClient {
    async fn fetch_quotes(&self) -> std::result::Result<Vec<Quote>, FetchError> {
        self.fetch_server_quotes().await.map_err(FetchError::from)
    }

    async fn push_quotes(&self, quotes: &[Quote]) -> std::result::Result<Value, FetchError> {
        self.push(quotes).await.map_err(FetchError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/posts", addr)
    }

    fn client(url: &str) -> RemoteQuoteClient {
        RemoteQuoteClient::new(url, 5, Duration::from_secs(5)).unwrap()
    }

    fn posts(count: u64) -> Value {
        Value::Array(
            (1..=count)
                .map(|id| json!({"userId": 1, "id": id, "title": format!("post {}", id), "body": "..."}))
                .collect(),
        )
    }

    #[tokio::test]
    async fn fetch_takes_first_five_titles_as_server_quotes() {
        let url = serve(Router::new().route("/posts", get(|| async { Json(posts(100)) }))).await;

        let quotes = client(&url).fetch_quotes().await.unwrap();

        assert_eq!(
            quotes,
            (1..=5)
                .map(|id| Quote::new(format!("post {}", id), "Server"))
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn fetch_returns_fewer_when_endpoint_lists_fewer() {
        let url = serve(Router::new().route(
            "/posts",
            get(|| async { Json(json!([{"id": 1, "title": "only"}, {"id": 2}])) }),
        ))
        .await;

        let quotes = client(&url).fetch_quotes().await.unwrap();

        assert_eq!(quotes, vec![Quote::from_server("only")]);
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let url = serve(Router::new().route(
            "/posts",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
        ))
        .await;

        let err = client(&url).fetch_quotes().await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn non_array_body_is_a_decode_error() {
        let url = serve(Router::new().route(
            "/posts",
            get(|| async { Json(json!({"title": "not a list"})) }),
        ))
        .await;

        let err = client(&url).fetch_quotes().await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}/posts", addr))
            .fetch_quotes()
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn push_posts_collection_and_returns_reply() {
        let url = serve(Router::new().route(
            "/posts",
            get(|| async { Json(posts(1)) }).post(|Json(body): Json<Value>| async move {
                (StatusCode::CREATED, Json(json!({"id": 101, "received": body})))
            }),
        ))
        .await;
        let quotes = vec![Quote::new("Simplicity is the soul of efficiency.", "Philosophy")];

        let reply = client(&url).push_quotes(&quotes).await.unwrap();

        assert_eq!(reply["id"], 101);
        assert_eq!(reply["received"][0]["category"], "Philosophy");
    }

    #[test]
    fn rejects_invalid_configuration() {
        let timeout = Duration::from_secs(1);
        assert!(matches!(
            RemoteQuoteClient::new("ftp://example.com", 5, timeout),
            Err(RemoteError::InvalidConfig(_))
        ));
        assert!(matches!(
            RemoteQuoteClient::new("https://example.com/posts", 0, timeout),
            Err(RemoteError::InvalidConfig(_))
        ));

        let ok = RemoteQuoteClient::new("https://example.com/posts/", 5, timeout).unwrap();
        assert_eq!(ok.url(), "https://example.com/posts");
        assert_eq!(ok.limit(), 5);
    }
}
