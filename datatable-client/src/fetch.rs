//! Page fetching
//!
//! The network fetch lives behind the [`PageFetcher`] trait so the table
//! controller can be driven by an in-process double in tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{Page, PageEnvelope, TableQuery};

use crate::config::TableConfig;
use crate::error::{ClientError, ClientResult};

/// Fetches one page of rows for a table query
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `base_url` with `query` appended per
    /// [`TableQuery::to_query_string`] and return the normalized page.
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        base_url: &str,
        query: &TableQuery,
    ) -> ClientResult<Page<T>>;
}

/// Network fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured request timeout.
    pub fn new(config: &TableConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        base_url: &str,
        query: &TableQuery,
    ) -> ClientResult<Page<T>> {
        let query_string = query.to_query_string();
        let url = if query_string.is_empty() {
            base_url.to_string()
        } else {
            format!("{}?{}", base_url, query_string)
        };

        tracing::debug!(%url, "fetching page");
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.bytes().await?;
        let envelope: PageEnvelope<T> = serde_json::from_slice(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))?;
        Ok(envelope.into_page()?)
    }
}
