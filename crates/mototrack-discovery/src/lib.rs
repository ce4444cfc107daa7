//! Endpoint resolution for the yard-tracking backend
//!
//! The backend is reachable at different base URLs depending on where the
//! client runs (emulator loopback alias, same-host loopback, LAN address).
//! This crate probes a fixed, ordered candidate list and memoizes the first
//! candidate that answers, so that every subsequent request skips discovery
//! entirely.
//!
//! # Resolution rules
//!
//! - Candidates are probed strictly in list order; the first success wins.
//! - A probe succeeds on any 2xx status **or 404** — both prove a live
//!   process behind the URL, even when the probed path does not exist.
//! - The resolved endpoint is cached until [`EndpointResolver::reset`] is
//!   called; there is no time-based expiry and no automatic re-probe.

pub mod config;
pub mod error;
pub mod metrics;
pub mod resolver;

pub use config::{DEFAULT_PROBE_TIMEOUT_MS, ResolverConfig, default_candidates};
pub use error::{DiscoveryError, Result};
pub use metrics::DiscoveryMetrics;
pub use resolver::{EndpointResolver, ResolverDebugInfo};
