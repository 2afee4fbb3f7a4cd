//! Backend endpoint configuration.
//!
//! A single base-URL setting resolved from a CLI flag, the `API_BASE`
//! environment variable (populated from `.env` by dotenvy at startup), or a
//! built-in default, in that order. Values copied out of `.env` files often
//! carry surrounding quotes, so those are stripped.

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Cached payloads stay valid this long before a refetch.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);
/// The health endpoint should answer fast; fail fast if it doesn't.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
/// The data endpoint aggregates on demand and can be very slow.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(1000);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
}

impl Config {
    /// Resolves the base URL: explicit flag beats `API_BASE` beats default.
    pub fn resolve(explicit: Option<String>) -> Self {
        let raw = explicit
            .or_else(|| std::env::var("API_BASE").ok())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_base: strip_quotes(&raw),
        }
    }

    pub fn data_url(&self) -> String {
        format!("{}/mgnrega/all", self.api_base.trim_end_matches('/'))
    }

    pub fn health_url(&self) -> String {
        format!("{}/mgnrega/health", self.api_base.trim_end_matches('/'))
    }
}

fn strip_quotes(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = if (trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2)
        || (trimmed.starts_with('\'') && trimmed.ends_with('\'') && trimmed.len() >= 2)
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    unquoted.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("http://a"), "http://a");
        assert_eq!(strip_quotes(" \"http://a\" "), "http://a");
        assert_eq!(strip_quotes("'http://a'"), "http://a");
        assert_eq!(strip_quotes("\" http://a \""), "http://a");
        // mismatched quotes are left alone
        assert_eq!(strip_quotes("\"http://a'"), "\"http://a'");
    }

    #[test]
    fn test_explicit_beats_default() {
        let config = Config::resolve(Some("'http://backend:9000/'".to_string()));
        assert_eq!(config.api_base, "http://backend:9000/");
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let config = Config {
            api_base: "http://backend:9000/".to_string(),
        };
        assert_eq!(config.data_url(), "http://backend:9000/mgnrega/all");
        assert_eq!(config.health_url(), "http://backend:9000/mgnrega/health");
    }
}
