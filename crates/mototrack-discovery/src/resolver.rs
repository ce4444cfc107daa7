//! Candidate probing and endpoint memoization
//!
//! The resolver owns the ordered candidate list and a write-once-until-reset
//! cache of the first candidate proven reachable. Concurrent callers share a
//! single in-flight probe pass instead of each re-running the loop.

use std::{sync::Arc, time::Duration};

use parking_lot::RwLock;
use reqwest::{Client as HttpClient, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    config::ResolverConfig,
    error::{DiscoveryError, Result},
    metrics::DiscoveryMetrics,
};

/// Snapshot of the resolver's state, for diagnostic display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverDebugInfo {
    /// The static candidate list, in probe order
    pub candidates: Vec<String>,

    /// The cached endpoint, if a resolution has succeeded
    pub resolved: Option<String>,
}

/// Probes candidate base URLs in priority order and caches the winner
///
/// One instance is shared (via `Arc`) by every component that issues
/// requests; constructing it per call would defeat the cache. Tests build
/// their own instance with a mock candidate list.
pub struct EndpointResolver {
    candidates: Vec<String>,
    http: HttpClient,
    resolved: RwLock<Option<String>>,
    probe_lock: Mutex<()>,
    metrics: Option<Arc<DiscoveryMetrics>>,
}

impl std::fmt::Debug for EndpointResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointResolver")
            .field("candidates", &self.candidates)
            .field("resolved", &*self.resolved.read())
            .finish()
    }
}

impl EndpointResolver {
    /// Create a resolver from a validated configuration
    ///
    /// The probe timeout is enforced at the HTTP client level, so every
    /// probe is individually bounded; expiry cancels that single probe and
    /// the loop advances to the next candidate.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        config.validate()?;

        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.probe_timeout_ms))
            .build()
            .map_err(|e| DiscoveryError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            candidates: config.candidates,
            http,
            resolved: RwLock::new(None),
            probe_lock: Mutex::new(()),
            metrics: None,
        })
    }

    /// Attach Prometheus metrics
    pub fn with_metrics(mut self, metrics: Arc<DiscoveryMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Return the reachable base URL, probing candidates if none is cached
    ///
    /// The fast path returns the cached endpoint with no network I/O. The
    /// slow path probes each candidate in list order and caches the first
    /// that answers; candidates after the winner are never probed.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::NoReachableEndpoint`] when every candidate
    /// fails. Individual probe failures are logged at debug and never
    /// surfaced on their own.
    pub async fn resolve(&self) -> Result<String> {
        if let Some(url) = self.resolved.read().clone() {
            debug!(url = %url, "Using cached endpoint");
            if let Some(m) = &self.metrics {
                m.record_cache_hit();
            }
            return Ok(url);
        }

        // Single-flight: concurrent callers queue here and re-check the
        // cache once the winner has written it.
        let _guard = self.probe_lock.lock().await;
        if let Some(url) = self.resolved.read().clone() {
            debug!(url = %url, "Endpoint resolved while waiting for probe guard");
            if let Some(m) = &self.metrics {
                m.record_cache_hit();
            }
            return Ok(url);
        }

        if let Some(m) = &self.metrics {
            m.record_cache_miss();
        }
        info!(count = self.candidates.len(), "Probing candidate endpoints");

        for candidate in &self.candidates {
            if self.probe(candidate).await {
                info!(url = %candidate, "Endpoint resolved");
                if let Some(m) = &self.metrics {
                    m.record_resolution(true);
                }
                *self.resolved.write() = Some(candidate.clone());
                return Ok(candidate.clone());
            }
        }

        warn!(tried = self.candidates.len(), "All candidate endpoints failed");
        if let Some(m) = &self.metrics {
            m.record_resolution(false);
        }
        Err(DiscoveryError::NoReachableEndpoint { candidates: self.candidates.clone() })
    }

    /// Clear the cached endpoint
    ///
    /// The next [`resolve`](Self::resolve) re-probes from the first
    /// candidate. No network I/O happens here.
    pub fn reset(&self) {
        if self.resolved.write().take().is_some() {
            info!("Resolved endpoint cleared; next resolve will re-probe");
        }
        if let Some(m) = &self.metrics {
            m.record_reset();
        }
    }

    /// Snapshot the candidate list and the cached endpoint
    pub fn debug_info(&self) -> ResolverDebugInfo {
        ResolverDebugInfo {
            candidates: self.candidates.clone(),
            resolved: self.resolved.read().clone(),
        }
    }

    /// The static candidate list, in probe order
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Issue one bounded reachability probe against a candidate
    ///
    /// A 404 here counts as alive: the process behind the URL answered,
    /// only the probed path is missing. This interpretation is specific to
    /// probing and must not leak into business reads.
    async fn probe(&self, candidate: &str) -> bool {
        debug!(url = %candidate, "Probing candidate");

        let alive = match self
            .http
            .get(candidate)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                let alive = status.is_success() || status.as_u16() == 404;
                if !alive {
                    debug!(url = %candidate, status = %status, "Candidate answered with non-alive status");
                }
                alive
            },
            Err(e) => {
                debug!(url = %candidate, error = %e, "Candidate probe failed");
                false
            },
        };

        if let Some(m) = &self.metrics {
            m.record_probe(alive);
        }
        alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    fn config_for(candidates: Vec<String>) -> ResolverConfig {
        ResolverConfig { candidates, probe_timeout_ms: 500 }
    }

    #[test]
    fn test_resolver_starts_unresolved() {
        let resolver = EndpointResolver::new(config_for(vec![
            "http://localhost:8080/api/moto".to_string(),
        ]))
        .unwrap();

        let info = resolver.debug_info();
        assert_eq!(info.candidates, vec!["http://localhost:8080/api/moto".to_string()]);
        assert!(info.resolved.is_none());
    }

    #[test]
    fn test_resolver_rejects_empty_candidates() {
        let result = EndpointResolver::new(config_for(vec![]));
        assert!(matches!(result, Err(DiscoveryError::Config(_))));
    }

    #[test]
    fn test_reset_without_resolution_is_harmless() {
        let resolver = EndpointResolver::new(config_for(vec![
            "http://localhost:8080/api/moto".to_string(),
        ]))
        .unwrap();

        resolver.reset();
        assert!(resolver.debug_info().resolved.is_none());
    }

    #[test]
    fn test_with_metrics_records_reset() {
        let registry = Registry::new();
        let metrics = Arc::new(DiscoveryMetrics::new(&registry).unwrap());
        let resolver = EndpointResolver::new(config_for(vec![
            "http://localhost:8080/api/moto".to_string(),
        ]))
        .unwrap()
        .with_metrics(metrics.clone());

        resolver.reset();
        assert_eq!(metrics.resets.get(), 1);
    }

    #[test]
    fn test_debug_info_round_trips_through_serde() {
        let info = ResolverDebugInfo {
            candidates: vec!["http://localhost:8080/api/moto".to_string()],
            resolved: Some("http://localhost:8080/api/moto".to_string()),
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: ResolverDebugInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, back);
    }
}
