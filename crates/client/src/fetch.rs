//! Catalog fetching.
//!
//! A single GET against the products endpoint, raced against the component's
//! [`CancelToken`]. No retries, no caching: the fetch is all-or-nothing.

use async_trait::async_trait;
use storefront_core::RawProduct;
use url::Url;

use crate::cancel::CancelToken;
use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0})")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Source of upstream product records.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<RawProduct>, FetchError>;
}

/// `reqwest`-backed source hitting the configured products endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.products_url().clone(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<RawProduct>, FetchError> {
        tracing::debug!(url = %self.url, "fetching catalog");

        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        resp.json::<Vec<RawProduct>>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Fetch the catalog unless `token` is cancelled first.
///
/// Returns `None` when the token fires before the response settles, or when it
/// was cancelled while the response was being read; the in-flight request is
/// dropped in that case.
pub async fn fetch_cancellable(
    source: &dyn CatalogSource,
    token: &CancelToken,
) -> Option<Result<Vec<RawProduct>, FetchError>> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        result = source.fetch_products() => {
            if token.is_cancelled() {
                None
            } else {
                Some(result)
            }
        }
    }
}
