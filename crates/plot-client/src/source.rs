//! Backend data source seam and its HTTP implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use vino_common::{DatasetInfo, VinoError, VinoId, VinoResult};
use vino_protocol::{info_url, DataChunk};

/// Source of dataset metadata and data chunks.
///
/// Paths passed to [`fetch_chunk`](DataSource::fetch_chunk) are the
/// backend-relative URLs produced by `vino_protocol::urls`.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_info(&self, id: VinoId) -> VinoResult<DatasetInfo>;
    async fn fetch_chunk(&self, path: &str) -> VinoResult<DataChunk>;
}

/// HTTP data source over the REST backend.
///
/// No request timeout is enforced: a slow fetch holds only the loading
/// indicator, never the caller's event loop.
pub struct HttpDataSource {
    client: Client,
    base_url: String,
}

impl HttpDataSource {
    /// Create a source rooted at `base_url` (scheme + host, no trailing
    /// path).
    pub fn new(base_url: impl Into<String>) -> VinoResult<Self> {
        let client = Client::builder()
            .tcp_nodelay(true)
            .build()
            .map_err(|e| VinoError::FetchError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> VinoResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VinoError::FetchError(format!("GET {} failed: {}", url, e)))?
            .error_for_status()
            .map_err(|e| VinoError::FetchError(format!("GET {} failed: {}", url, e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| VinoError::FetchError(format!("reading {} failed: {}", url, e)))?;

        serde_json::from_str(&body)
            .map_err(|e| VinoError::DecodeError(format!("decoding {} failed: {}", url, e)))
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_info(&self, id: VinoId) -> VinoResult<DatasetInfo> {
        self.get_json(&info_url(id)).await
    }

    async fn fetch_chunk(&self, path: &str) -> VinoResult<DataChunk> {
        self.get_json(path).await
    }
}
