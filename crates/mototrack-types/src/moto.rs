//! Moto entity and request payloads
//!
//! Field names follow the backend's camelCase wire keys. Timestamps stay
//! opaque strings: the backend does not guarantee an RFC 3339 offset, so
//! parsing them here would reject otherwise valid records.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A tracked moto record as returned by the backend
///
/// The identifier is assigned by the remote service. `data_saida` is absent
/// while the moto is still in the yard and set exactly once on departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moto {
    /// Server-assigned identifier
    pub id: i64,

    /// Descriptive label (e.g., "Honda CG 160")
    pub modelo: String,

    /// Unique device/tag identifier correlated to this record
    pub iot_identificador: String,

    /// Entry timestamp
    pub data_entrada: String,

    /// Exit timestamp, absent while parked
    #[serde(default)]
    pub data_saida: Option<String>,

    /// Sector identifier
    pub setor_id: i64,

    /// Denormalized sector display name
    pub setor_nome: String,
}

impl Moto {
    /// Whether the moto is still in the yard (no exit recorded)
    pub fn is_parked(&self) -> bool {
        self.data_saida.is_none()
    }
}

/// Payload for registering a moto entering the yard
///
/// Carries no identifier; the backend assigns one on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMotoRequest {
    pub modelo: String,
    pub iot_identificador: String,
    pub setor_id: i64,
}

impl CreateMotoRequest {
    /// Caller-side validation of required fields
    ///
    /// The client itself does not re-check these; callers validate before
    /// invoking it.
    pub fn validate(&self) -> Result<()> {
        validate_required(&self.modelo, &self.iot_identificador)
    }
}

/// Payload for replacing a moto record
///
/// The identifier is required and must match the id addressed on the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMotoRequest {
    pub id: i64,
    pub modelo: String,
    pub iot_identificador: String,
    pub setor_id: i64,
}

impl UpdateMotoRequest {
    /// Caller-side validation of required fields
    pub fn validate(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(Error::Validation("id must be positive".to_string()));
        }
        validate_required(&self.modelo, &self.iot_identificador)
    }
}

fn validate_required(modelo: &str, iot_identificador: &str) -> Result<()> {
    if modelo.trim().is_empty() {
        return Err(Error::Validation("modelo must not be empty".to_string()));
    }
    if iot_identificador.trim().is_empty() {
        return Err(Error::Validation("iotIdentificador must not be empty".to_string()));
    }
    Ok(())
}
