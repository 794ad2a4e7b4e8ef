use crate::core::{ActionEndpoint, DispatchError};
use crate::models::{Action, Candidate};
use crate::services::FeedStore;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the matching API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: session missing or expired")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Matching API client
///
/// Handles the two calls the deck needs:
/// - Fetching the candidate feed
/// - Sending an interested/ignored connection request
pub struct ApiClient {
    base_url: String,
    session_token: Option<String>,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, session_token: Option<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            session_token: session_token.filter(|t| !t.is_empty()),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let builder = self.client.request(method, url);

        match &self.session_token {
            Some(token) => builder.header(reqwest::header::COOKIE, format!("token={}", token)),
            None => builder,
        }
    }

    /// Fetch the current candidate feed
    pub async fn fetch_feed(&self) -> Result<Vec<Candidate>, ApiError> {
        tracing::debug!("Fetching feed from {}", self.base_url);

        let response = self.request(Method::GET, "/feed").send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized),
            status if !status.is_success() => {
                return Err(ApiError::ApiError(format!("Failed to fetch feed: {}", status)));
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("data")
            .and_then(|d| d.as_array())
            .ok_or_else(|| ApiError::InvalidResponse("Missing data array".into()))?;

        let candidates: Vec<Candidate> = documents
            .iter()
            .filter_map(|doc| match serde_json::from_value(doc.clone()) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::debug!("Skipping malformed feed entry: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} candidates (raw: {})", candidates.len(), documents.len());

        Ok(candidates)
    }

    /// Fetch the feed and publish it to `feed`
    pub async fn refresh_feed(&self, feed: &FeedStore) -> Result<usize, ApiError> {
        let candidates = self.fetch_feed().await?;
        let count = candidates.len();
        feed.set_feed(candidates);
        Ok(count)
    }

    /// Send a connection request with the status matching `action`
    pub async fn send_request(&self, action: Action, candidate_id: &str) -> Result<(), ApiError> {
        let path = format!(
            "/request/send/{}/{}",
            action.status(),
            urlencoding::encode(candidate_id)
        );

        let response = self
            .request(Method::POST, &path)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Request {} for {} failed: {} - {}", action.status(), candidate_id, status, body);
                Err(ApiError::ApiError(format!("Failed to send request: {}", status)))
            }
            _ => {
                tracing::debug!("Sent {} request for {}", action.status(), candidate_id);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl ActionEndpoint for ApiClient {
    async fn send(&self, action: Action, candidate_id: &str) -> Result<(), DispatchError> {
        self.send_request(action, candidate_id).await.map_err(|e| match e {
            ApiError::RequestError(e) => DispatchError::Transport(e.to_string()),
            other => DispatchError::Rejected(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = ApiClient::new("http://api.test/".to_string(), Some(String::new()), 5).unwrap();

        assert_eq!(client.base_url, "http://api.test/");
        assert!(client.session_token.is_none());
    }

    #[tokio::test]
    async fn test_fetch_feed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/feed")
            .match_header("cookie", "token=abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"_id": "1", "firstName": "Ada"}, {"bogus": true}]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), Some("abc".to_string()), 5).unwrap();
        let feed = client.fetch_feed().await.unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].first_name, "Ada");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_feed_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/feed").with_status(401).create_async().await;

        let client = ApiClient::new(server.url(), None, 5).unwrap();
        assert!(matches!(client.fetch_feed().await, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_send_request_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/request/send/ignored/64f1")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), None, 5).unwrap();
        client.send(Action::Reject, "64f1").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_request_failure_maps_to_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/request/send/interested/64f1")
            .with_status(400)
            .with_body("already sent")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), None, 5).unwrap();
        let result = client.send(Action::Accept, "64f1").await;
        assert!(matches!(result, Err(DispatchError::Rejected(_))));
    }
}
