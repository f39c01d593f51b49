use super::client::HttpClient;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Default total request timeout. Matches what the feed proxy tolerates on
/// a slow day without leaving the dashboard hanging.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Shorter default for the vehicle position probe, whose payload is much
/// smaller than the trip update feed.
pub const VEHICLE_TIMEOUT_SECS: u64 = 10;

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
