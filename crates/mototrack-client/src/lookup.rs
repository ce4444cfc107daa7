//! Device-tag lookup
//!
//! The backend exposes no lookup-by-tag endpoint, so this is a client-side
//! scan over the full collection — acceptable while the yard stays small.
//! Kept in its own module so the scan can be swapped for a server-side
//! query without changing callers.

use mototrack_types::{Moto, Result};
use tracing::debug;

use crate::client::MotoClient;

impl MotoClient {
    /// Find the record carrying a device tag (case-sensitive exact match)
    ///
    /// Returns `Ok(None)` when no record carries the tag; absence is not an
    /// error.
    pub async fn find_by_tag(&self, tag: &str) -> Result<Option<Moto>> {
        let motos = self.list().await?;
        debug!(tag = %tag, scanned = motos.len(), "Scanning collection for device tag");
        Ok(motos.into_iter().find(|moto| moto.iot_identificador == tag))
    }
}
