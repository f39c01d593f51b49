//! HTTP fetch layer for the binary GTFS-RT endpoints.
//!
//! One GET per invocation, bounded by the client timeout. Non-success
//! statuses are errors; there are no retries.

mod basic;
mod client;

pub use basic::{BasicClient, DEFAULT_TIMEOUT_SECS, VEHICLE_TIMEOUT_SECS};
pub use client::HttpClient;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::debug;

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("GET {url} failed"))?
        .error_for_status()?;

    let bytes = resp.bytes().await.context("failed to read response body")?;
    debug!(url, bytes = bytes.len(), "feed bytes received");

    Ok(bytes)
}
