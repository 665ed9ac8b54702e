use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::config::FetchConfig;
use crate::utils::error::{AppError, Result};

/// Thin wrapper around a shared HTTP client used for price checks.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    /// GET the item page and return the raw response body. Only status 200
    /// counts as success; anything else is a recoverable per-item failure.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_fetcher() -> Fetcher {
        Fetcher::new(&FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widget"))
            .respond_with(ResponseTemplate::new(200).set_body_string("price: $17.50"))
            .mount(&server)
            .await;

        let body = test_fetcher()
            .fetch(&format!("{}/widget", server.uri()))
            .await
            .unwrap();

        assert_eq!(body, b"price: $17.50");
    }

    #[tokio::test]
    async fn test_non_200_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widget"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = test_fetcher()
            .fetch(&format!("{}/widget", server.uri()))
            .await;

        match result {
            Err(AppError::FetchStatus { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected FetchStatus error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_other_2xx_status_is_error() {
        // 200 exactly, not merely "success class"
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widget"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = test_fetcher()
            .fetch(&format!("{}/widget", server.uri()))
            .await;

        assert!(matches!(result, Err(AppError::FetchStatus { status: 204, .. })));
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        // Nothing listens on this port
        let result = test_fetcher().fetch("http://127.0.0.1:9/widget").await;
        assert!(matches!(result, Err(AppError::Http(_))));
    }
}
