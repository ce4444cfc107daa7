//! # Mototrack Types
//!
//! Shared type definitions for the mototrack client ecosystem.
//!
//! This crate provides the domain entity, the request payloads, and the
//! error taxonomy used across the resolver, the CRUD client, and the CLI,
//! ensuring a single source of truth and preventing circular dependencies.

// ============================================================================
// Error Types
// ============================================================================

pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Domain Entity and Request Types
// ============================================================================

pub mod moto;

pub use moto::{CreateMotoRequest, Moto, UpdateMotoRequest};
