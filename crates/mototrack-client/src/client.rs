//! HTTP client for the yard backend's moto collection
//!
//! Wraps the endpoint resolver and issues typed CRUD requests against the
//! resolved base URL. A failed request surfaces its error as-is and leaves
//! the cached endpoint untouched; re-probing only ever happens after an
//! explicit [`MotoClient::reset_endpoint`].

use std::{sync::Arc, time::Duration};

use mototrack_discovery::{DiscoveryError, EndpointResolver, ResolverDebugInfo};
use mototrack_types::{CreateMotoRequest, Error, Moto, Result, UpdateMotoRequest};
use reqwest::{Client as HttpClient, Response};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ClientConfig;

/// Outcome of a connection test, for diagnostic display
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatus {
    /// Whether any candidate endpoint answered
    pub reachable: bool,

    /// The resolved URL on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// The failure message otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Typed CRUD client for moto records
///
/// Collection requests go to the resolved base URL; per-record requests go
/// to `{base}/{id}`. Every request is bounded by the configured request
/// timeout. Nothing is retried here.
pub struct MotoClient {
    http: HttpClient,
    resolver: Arc<EndpointResolver>,
}

impl std::fmt::Debug for MotoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotoClient").field("resolver", &self.resolver).finish()
    }
}

impl MotoClient {
    /// Create a client from configuration, building its own resolver
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let resolver = EndpointResolver::new(config.discovery).map_err(from_discovery)?;
        Self::with_resolver(Arc::new(resolver), Duration::from_millis(config.request_timeout_ms))
    }

    /// Create a client around an existing (possibly shared) resolver
    pub fn with_resolver(resolver: Arc<EndpointResolver>, request_timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(request_timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http, resolver })
    }

    /// The resolver backing this client
    pub fn resolver(&self) -> &Arc<EndpointResolver> {
        &self.resolver
    }

    /// List every moto record, in the order the backend returns them
    pub async fn list(&self) -> Result<Vec<Moto>> {
        let base = self.base_url().await?;
        let response = self.http.get(&base).send().await.map_err(transport)?;
        let response = check_status(response).await?;
        response.json().await.map_err(transport)
    }

    /// Fetch a single record by id
    ///
    /// A 404 here means the record does not exist and maps to `Ok(None)` —
    /// unlike the resolver's probe, where 404 is a liveness signal. The two
    /// interpretations live in separate code paths on purpose.
    pub async fn get(&self, id: i64) -> Result<Option<Moto>> {
        let base = self.base_url().await?;
        let url = format!("{}/{}", base, id);
        let response = self.http.get(&url).send().await.map_err(transport)?;
        if response.status().as_u16() == 404 {
            debug!(id = id, "Moto not found");
            return Ok(None);
        }
        let response = check_status(response).await?;
        response.json().await.map(Some).map_err(transport)
    }

    /// Register a moto entering the yard
    ///
    /// Field validation (non-empty modelo and tag) is the caller's job,
    /// before invoking this.
    pub async fn create(&self, request: &CreateMotoRequest) -> Result<Moto> {
        let base = self.base_url().await?;
        let response = self.http.post(&base).json(request).send().await.map_err(transport)?;
        let response = check_status(response).await?;
        let created: Moto = response.json().await.map_err(transport)?;
        info!(id = created.id, iot = %created.iot_identificador, "Moto created");
        Ok(created)
    }

    /// Replace the record addressed by `id`
    ///
    /// A body id that does not match the path id is rejected locally with a
    /// validation error, before any network I/O.
    pub async fn update(&self, id: i64, request: &UpdateMotoRequest) -> Result<Moto> {
        if request.id != id {
            return Err(Error::Validation(format!(
                "body id {} does not match path id {}",
                request.id, id
            )));
        }
        let base = self.base_url().await?;
        let url = format!("{}/{}", base, id);
        let response = self.http.put(&url).json(request).send().await.map_err(transport)?;
        let response = check_status(response).await?;
        let updated: Moto = response.json().await.map_err(transport)?;
        info!(id = updated.id, "Moto updated");
        Ok(updated)
    }

    /// Delete the record addressed by `id`
    pub async fn delete(&self, id: i64) -> Result<()> {
        let base = self.base_url().await?;
        let url = format!("{}/{}", base, id);
        let response = self.http.delete(&url).send().await.map_err(transport)?;
        check_status(response).await?;
        info!(id = id, "Moto deleted");
        Ok(())
    }

    /// Run endpoint resolution and report the outcome without failing
    pub async fn test_connection(&self) -> ConnectionStatus {
        match self.resolver.resolve().await {
            Ok(url) => ConnectionStatus { reachable: true, url: Some(url), error: None },
            Err(e) => {
                ConnectionStatus { reachable: false, url: None, error: Some(e.to_string()) }
            },
        }
    }

    /// Clear the cached endpoint; the next request re-probes from scratch
    pub fn reset_endpoint(&self) {
        self.resolver.reset();
    }

    /// Snapshot the resolver's candidates and cached endpoint
    pub fn debug_info(&self) -> ResolverDebugInfo {
        self.resolver.debug_info()
    }

    async fn base_url(&self) -> Result<String> {
        self.resolver.resolve().await.map_err(from_discovery)
    }
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

fn from_discovery(e: DiscoveryError) -> Error {
    match e {
        DiscoveryError::NoReachableEndpoint { candidates } => {
            Error::NoReachableEndpoint { candidates }
        },
        DiscoveryError::InvalidUrl(msg) | DiscoveryError::Config(msg) => Error::Config(msg),
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Service { status: status.as_u16(), body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mototrack_discovery::ResolverConfig;

    fn test_client() -> MotoClient {
        let resolver = EndpointResolver::new(ResolverConfig {
            candidates: vec!["http://127.0.0.1:8080/api/moto".to_string()],
            probe_timeout_ms: 500,
        })
        .unwrap();
        MotoClient::with_resolver(Arc::new(resolver), Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_client_creation_from_config() {
        let client = MotoClient::new(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig { request_timeout_ms: 0, ..ClientConfig::default() };
        assert!(matches!(MotoClient::new(config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_update_id_mismatch_rejected_locally() {
        let client = test_client();
        let request = UpdateMotoRequest {
            id: 6,
            modelo: "X".to_string(),
            iot_identificador: "Y".to_string(),
            setor_id: 2,
        };

        let err = client.update(5, &request).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        // Rejected before resolution: nothing cached
        assert!(client.debug_info().resolved.is_none());
    }

    #[test]
    fn test_discovery_error_mapping() {
        let err = from_discovery(DiscoveryError::NoReachableEndpoint {
            candidates: vec!["http://localhost:8080/api/moto".to_string()],
        });
        assert!(matches!(err, Error::NoReachableEndpoint { .. }));

        let err = from_discovery(DiscoveryError::Config("bad".to_string()));
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_connection_status_serialization() {
        let status = ConnectionStatus {
            reachable: true,
            url: Some("http://localhost:8080/api/moto".to_string()),
            error: None,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["reachable"], true);
        assert!(json.get("error").is_none());
    }
}
