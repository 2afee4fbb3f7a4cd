//! Session-owned orchestration of fetch and cache.
//!
//! The cache lives on the session, not in ambient process state, so each
//! session controls its own snapshot lifecycle.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::cache::PayloadCache;
use crate::config::CACHE_TTL;
use crate::model::Payload;
use crate::services::scheme_api::SchemeApi;

pub struct Session<A: SchemeApi> {
    api: A,
    cache: PayloadCache,
    cache_key: String,
    ttl: Duration,
}

impl<A: SchemeApi> Session<A> {
    /// Creates a session keyed by the data URL with the default 30-minute TTL.
    pub fn new(api: A, cache_key: String) -> Self {
        Self::with_ttl(api, cache_key, CACHE_TTL)
    }

    pub fn with_ttl(api: A, cache_key: String, ttl: Duration) -> Self {
        Self {
            api,
            cache: PayloadCache::new(),
            cache_key,
            ttl,
        }
    }

    /// Returns the current payload, serving from cache when the entry is
    /// still live.
    pub async fn payload(&mut self) -> Result<Arc<Payload>> {
        if let Some(hit) = self.cache.get(&self.cache_key) {
            debug!(key = %self.cache_key, "Payload served from cache");
            return Ok(hit);
        }

        info!(key = %self.cache_key, "Fetching payload from backend");
        let payload = self.api.fetch_all().await?;
        info!(
            rows = payload.mgnrega_data.len(),
            states = payload.states.len(),
            "Payload fetched"
        );
        Ok(self.cache.put(&self.cache_key, payload, self.ttl))
    }

    /// Invalidates the cached payload and refetches. Safe to invoke
    /// repeatedly.
    pub async fn refresh(&mut self) -> Result<Arc<Payload>> {
        self.cache.invalidate(&self.cache_key);
        self.payload().await
    }

    pub async fn health(&self) -> Result<()> {
        self.api.health().await
    }
}
