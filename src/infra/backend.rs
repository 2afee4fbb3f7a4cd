//! Production HTTP client for the MGNREGA backend.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::config::{Config, FETCH_TIMEOUT, HEALTH_TIMEOUT};
use crate::fetch::{build_client, get_bytes, get_ok};
use crate::model::Payload;
use crate::parser::parse_payload;
use crate::services::scheme_api::SchemeApi;

pub struct BackendClient {
    client: reqwest::Client,
    data_url: String,
    health_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self> {
        // The data endpoint aggregates server-side and can take minutes, so
        // the client-wide timeout is generous; the health probe overrides it
        // per request.
        Ok(Self {
            client: build_client(FETCH_TIMEOUT)?,
            data_url: config.data_url(),
            health_url: config.health_url(),
        })
    }
}

#[async_trait]
impl SchemeApi for BackendClient {
    async fn health(&self) -> Result<()> {
        get_ok(&self.client, &self.health_url, HEALTH_TIMEOUT).await
    }

    async fn fetch_all(&self) -> Result<Payload> {
        let bytes = get_bytes(&self.client, &self.data_url).await?;
        debug!(bytes = bytes.len(), "Payload bytes received, parsing");
        parse_payload(&bytes)
    }
}
