//! Configuration types for endpoint resolution

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// Default per-probe timeout in milliseconds
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// Endpoint resolution configuration
///
/// The candidate order is significant: it encodes deployment-context
/// preference (emulator alias before same-host loopback before LAN), not a
/// load-balanced set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Ordered candidate base URLs for the same logical service
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    /// Per-probe timeout (in milliseconds)
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { candidates: default_candidates(), probe_timeout_ms: default_probe_timeout_ms() }
    }
}

/// Default candidate base URLs, in priority order
pub fn default_candidates() -> Vec<String> {
    vec![
        "http://10.0.2.2:8080/api/moto".to_string(), // emulator loopback alias
        "http://localhost:8080/api/moto".to_string(), // simulator / same host
        "http://127.0.0.1:8080/api/moto".to_string(), // explicit loopback
        "http://192.168.1.100:8080/api/moto".to_string(), // LAN address
    ]
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

impl ResolverConfig {
    /// Validate the candidate list
    pub fn validate(&self) -> Result<()> {
        if self.candidates.is_empty() {
            return Err(DiscoveryError::Config("candidate list must not be empty".to_string()));
        }
        if self.probe_timeout_ms == 0 {
            return Err(DiscoveryError::Config("probe_timeout_ms must be positive".to_string()));
        }
        for candidate in &self.candidates {
            url::Url::parse(candidate)
                .map_err(|e| DiscoveryError::InvalidUrl(format!("{}: {}", candidate, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.candidates.len(), 4);
        assert_eq!(config.candidates[0], "http://10.0.2.2:8080/api/moto");
        assert_eq!(config.probe_timeout_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let config = ResolverConfig { candidates: vec![], probe_timeout_ms: 3000 };
        assert!(matches!(config.validate(), Err(DiscoveryError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ResolverConfig {
            candidates: vec!["http://localhost:8080/api/moto".to_string()],
            probe_timeout_ms: 0,
        };
        assert!(matches!(config.validate(), Err(DiscoveryError::Config(_))));
    }

    #[test]
    fn test_invalid_candidate_rejected() {
        let config = ResolverConfig {
            candidates: vec!["not a url".to_string()],
            probe_timeout_ms: 3000,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidUrl(_)));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_serde_defaults() {
        let config: ResolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ResolverConfig::default());

        let config: ResolverConfig =
            serde_json::from_str(r#"{"probe_timeout_ms": 500}"#).unwrap();
        assert_eq!(config.probe_timeout_ms, 500);
        assert_eq!(config.candidates.len(), 4);
    }
}
