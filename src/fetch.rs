//! Thin HTTP helpers over reqwest.
//!
//! No automatic retries: a failed or timed-out request surfaces as an error
//! and the caller decides whether to try again.

use std::time::Duration;

use anyhow::Result;

use crate::config::CONNECT_TIMEOUT;

/// Builds a client with an explicit request timeout so no call can block
/// indefinitely.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?)
}

/// GET `url` and return the response body bytes.
///
/// A non-success status is an error carrying the status code and a snippet of
/// the body for diagnostics.
#[tracing::instrument(skip(client))]
pub async fn get_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send request to {}: {}", url, e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        return Err(anyhow::anyhow!(
            "GET {} returned status {}: {}",
            url,
            status,
            snippet
        ));
    }

    Ok(response.bytes().await?.to_vec())
}

/// GET `url` with a per-request timeout, checking only for a success status.
/// Used as the health probe.
#[tracing::instrument(skip(client))]
pub async fn get_ok(client: &reqwest::Client, url: &str, timeout: Duration) -> Result<()> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("Health check failed for {}: {}", url, e))?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!(
            "Health check for {} returned status {}",
            url,
            response.status()
        ));
    }

    Ok(())
}
