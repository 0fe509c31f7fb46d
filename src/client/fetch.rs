// src/client/fetch.rs

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// A single read of one widget's data.
#[async_trait]
pub trait Fetch<T>: Send + Sync {
    async fn fetch(&self) -> Result<T, FetchError>;
}

/// GETs a JSON endpoint of the dashboard API.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client, base: &str, path: &str) -> Self {
        let url = format!("{}{}", base.trim_end_matches('/'), path);
        Self { client, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<T> Fetch<T> for HttpFetcher
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self) -> Result<T, FetchError> {
        let resp = self.client.get(&self.url).send().await.map_err(FetchError::Transport)?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        resp.json::<T>().await.map_err(FetchError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = reqwest::Client::new();
        assert_eq!(
            HttpFetcher::new(client.clone(), "http://127.0.0.1:5000/", "/api/drivers").url(),
            "http://127.0.0.1:5000/api/drivers"
        );
        assert_eq!(
            HttpFetcher::new(client, "http://cabs.local", "/api/metrics").url(),
            "http://cabs.local/api/metrics"
        );
    }

    #[test]
    fn status_error_message() {
        assert_eq!(FetchError::Status(503).to_string(), "unexpected status 503");
    }
}
