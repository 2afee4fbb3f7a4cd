//! Trait for the MGNREGA backend API.

use anyhow::Result;

use crate::model::Payload;

/// Abstraction over the scheme data backend. The session depends on this
/// seam, not on a concrete HTTP client, so tests can stub the network.
#[async_trait::async_trait]
pub trait SchemeApi: Send + Sync {
    /// Probes the backend health endpoint.
    async fn health(&self) -> Result<()>;

    /// Fetches the full pre-aggregated payload.
    async fn fetch_all(&self) -> Result<Payload>;
}
