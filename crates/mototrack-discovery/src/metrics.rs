//! Prometheus metrics for endpoint resolution

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

/// Resolution metrics
pub struct DiscoveryMetrics {
    /// Probes issued, by outcome
    pub probes: IntCounterVec,
    /// Resolution passes, by outcome
    pub resolutions: IntCounterVec,
    /// Cache hits (resolve() answered without probing)
    pub cache_hits: IntCounter,
    /// Cache misses (resolve() had to run the probe loop)
    pub cache_misses: IntCounter,
    /// Manual cache resets
    pub resets: IntCounter,
}

impl DiscoveryMetrics {
    /// Create and register resolution metrics
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let probes = IntCounterVec::new(
            Opts::new("mototrack_probes_total", "Total number of candidate probes"),
            &["outcome"],
        )?;
        registry.register(Box::new(probes.clone()))?;

        let resolutions = IntCounterVec::new(
            Opts::new("mototrack_resolutions_total", "Total number of resolution passes"),
            &["outcome"],
        )?;
        registry.register(Box::new(resolutions.clone()))?;

        let cache_hits = IntCounter::new(
            "mototrack_resolver_cache_hits_total",
            "Total number of resolver cache hits",
        )?;
        registry.register(Box::new(cache_hits.clone()))?;

        let cache_misses = IntCounter::new(
            "mototrack_resolver_cache_misses_total",
            "Total number of resolver cache misses",
        )?;
        registry.register(Box::new(cache_misses.clone()))?;

        let resets = IntCounter::new(
            "mototrack_resolver_resets_total",
            "Total number of manual resolver resets",
        )?;
        registry.register(Box::new(resets.clone()))?;

        Ok(Self { probes, resolutions, cache_hits, cache_misses, resets })
    }

    /// Record a probe outcome
    pub fn record_probe(&self, alive: bool) {
        let outcome = if alive { "alive" } else { "dead" };
        self.probes.with_label_values(&[outcome]).inc();
    }

    /// Record a resolution pass outcome
    pub fn record_resolution(&self, success: bool) {
        let outcome = if success { "resolved" } else { "exhausted" };
        self.resolutions.with_label_values(&[outcome]).inc();
    }

    /// Record a cache hit
    pub fn record_cache_hit(&self) {
        self.cache_hits.inc();
    }

    /// Record a cache miss
    pub fn record_cache_miss(&self) {
        self.cache_misses.inc();
    }

    /// Record a manual reset
    pub fn record_reset(&self) {
        self.resets.inc();
    }
}
