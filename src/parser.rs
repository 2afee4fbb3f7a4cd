//! JSON parser for the backend data payload.

use anyhow::{Context, Result};

use crate::model::Payload;

/// Decodes a [`Payload`] from a raw HTTP response body.
///
/// A valid JSON object with any or all keys missing or null parses to a
/// payload with empty containers (the backend contract allows partial data).
///
/// # Errors
///
/// Returns an error only if the bytes are not valid JSON at all.
pub fn parse_payload(bytes: &[u8]) -> Result<Payload> {
    serde_json::from_slice(bytes).context("backend payload is not valid JSON")
}
