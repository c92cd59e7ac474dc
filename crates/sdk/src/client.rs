//! SimpleQueue Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    DumpResponse, GetResponse, PutResponse, RotateResponse, StatsFormat, StatsResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::time::Duration;

/// SimpleQueue Client
///
/// Thin typed wrapper over the daemon's JSON-RPC API.
///
/// # Example
///
/// ```no_run
/// use simplequeue_sdk::QueueClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QueueClient::connect("http://127.0.0.1:8080").await?;
/// # Ok(())
/// # }
/// ```
pub struct QueueClient {
    client: HttpClient,
}

fn queue_params(queue: &str) -> Result<ObjectParams> {
    let mut params = ObjectParams::new();
    params.insert("queue", queue)?;
    Ok(params)
}

impl QueueClient {
    /// Connect to the SimpleQueue daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:8080`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Append `data` to `queue`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use simplequeue_sdk::QueueClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = QueueClient::connect("http://127.0.0.1:8080").await?;
    /// let response = client.put("events", "payload").await?;
    /// println!("depth now {}", response.depth);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn put(&self, queue: &str, data: impl Into<String>) -> Result<PutResponse> {
        let mut params = queue_params(queue)?;
        params.insert("data", data.into())?;
        let response: PutResponse = self.client.request("queue.put.v1", params).await?;

        Ok(response)
    }

    /// Remove and return the oldest payload of `queue`, `None` if there is none
    pub async fn get(&self, queue: &str) -> Result<Option<String>> {
        let response: GetResponse = self
            .client
            .request("queue.get.v1", queue_params(queue)?)
            .await?;

        Ok(response.data)
    }

    /// Current payloads of `queue`, oldest first, without removing them
    pub async fn dump(&self, queue: &str) -> Result<Vec<String>> {
        let response: DumpResponse = self
            .client
            .request("queue.dump.v1", queue_params(queue)?)
            .await?;

        Ok(response
            .data
            .split_terminator('\n')
            .map(str::to_string)
            .collect())
    }

    /// Rendered stats in the requested format
    pub async fn stats(&self, format: StatsFormat) -> Result<String> {
        let mut params = ObjectParams::new();
        params.insert("format", format)?;
        let response: StatsResponse = self.client.request("admin.stats.v1", params).await?;

        response
            .body
            .ok_or_else(|| SdkError::Other("stats response had no body".to_string()))
    }

    /// Zero the global puts/gets/high-water counters
    pub async fn reset_stats(&self) -> Result<()> {
        let mut params = ObjectParams::new();
        params.insert("reset", true)?;
        let _: StatsResponse = self.client.request("admin.stats.v1", params).await?;

        Ok(())
    }

    /// Ask the daemon to reopen its overflow log. `false` when none is configured.
    pub async fn rotate(&self) -> Result<bool> {
        let response: RotateResponse = self
            .client
            .request("admin.rotate.v1", ObjectParams::new())
            .await?;

        Ok(response.rotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_bad_url() {
        let result = tokio_test::block_on(QueueClient::connect("not a url"));
        assert!(matches!(result, Err(SdkError::Connection(_))));
    }

    #[test]
    fn test_stats_format_wire_names() {
        assert_eq!(
            serde_json::to_value(StatsFormat::Json).unwrap(),
            serde_json::json!("json")
        );
        assert_eq!(
            serde_json::to_value(StatsFormat::Text).unwrap(),
            serde_json::json!("text")
        );
    }
}
