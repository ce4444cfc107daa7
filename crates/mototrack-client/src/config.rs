//! Client configuration
//!
//! Defaults come from serde `#[serde(default)]` annotations; an optional
//! config file and `MOTOTRACK`-prefixed environment variables are layered on
//! top, environment winning.

use std::path::Path;

use mototrack_discovery::ResolverConfig;
use mototrack_types::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default timeout for CRUD requests against the resolved endpoint
///
/// Probes carry their own bound; this one covers everything after
/// resolution, so no request can wait forever.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Root configuration for the yard-tracking client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint resolution configuration
    #[serde(default)]
    pub discovery: ResolverConfig,

    /// Timeout for CRUD requests (in milliseconds)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Log level filter (overridden by `RUST_LOG`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            discovery: ResolverConfig::default(),
            request_timeout_ms: default_request_timeout_ms(),
            log_level: default_log_level(),
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClientConfig {
    /// Load configuration from an optional file plus environment variables
    ///
    /// Layering, lowest precedence first: serde defaults, the config file
    /// (skipped when absent), then `MOTOTRACK__`-prefixed environment
    /// variables (e.g. `MOTOTRACK__REQUEST_TIMEOUT_MS=5000`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let builder =
            config::Config::builder().add_source(config::File::from(path.as_ref()).required(false));

        let builder = builder.add_source(
            config::Environment::with_prefix("MOTOTRACK").separator("__").try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build config: {}", e)))?;

        config
            .try_deserialize()
            .map_err(|e| Error::Config(format!("failed to deserialize config: {}", e)))
    }

    /// Load configuration, falling back to defaults on any failure
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %path.as_ref().display(),
                    "Failed to load config, using defaults"
                );
                Self::default()
            },
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.discovery.validate().map_err(|e| Error::Config(e.to_string()))?;
        if self.request_timeout_ms == 0 {
            return Err(Error::Config("request_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.discovery.candidates.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let config = ClientConfig { request_timeout_ms: 0, ..ClientConfig::default() };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_discovery_rejected() {
        let config = ClientConfig {
            discovery: ResolverConfig { candidates: vec![], probe_timeout_ms: 3000 },
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_serde_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ClientConfig::load("/nonexistent/mototrack.yaml").unwrap();
        assert_eq!(config.request_timeout_ms, 10_000);
    }
}
