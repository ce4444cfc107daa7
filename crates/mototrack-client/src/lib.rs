//! Typed CRUD client for the yard-tracking backend
//!
//! Every operation resolves the backend's base URL through
//! [`mototrack_discovery::EndpointResolver`] first (a cached, no-I/O step
//! after the first call), then issues exactly one HTTP request. Transport
//! outcomes are translated into the domain error taxonomy from
//! [`mototrack_types`]; nothing is retried at this layer — retry policy
//! belongs to the caller.

pub mod client;
pub mod config;
pub mod lookup;

pub use client::{ConnectionStatus, MotoClient};
pub use config::ClientConfig;

pub use mototrack_discovery::{EndpointResolver, ResolverConfig, ResolverDebugInfo};
pub use mototrack_types::{CreateMotoRequest, Error, Moto, Result, UpdateMotoRequest};
