//! Test fixtures for mototrack integration tests.
//!
//! Provides local servers bound to `127.0.0.1:0` so tests exercise the real
//! network path without external dependencies:
//!
//! - [`MockYardApi`] — an in-memory rendition of the yard backend's moto
//!   collection (list/get/create/update/delete), with a request counter and
//!   an induced-failure switch.
//! - [`CountingServer`] — answers every request with a fixed status,
//!   optionally after a delay; used to observe probe traffic.
//! - [`SilentServer`] — accepts connections and never answers; used to
//!   exercise probe timeouts.
//! - [`refused_url`] — a URL whose port is closed, for connection-refused
//!   paths.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use mototrack_types::{CreateMotoRequest, Moto, UpdateMotoRequest};
use parking_lot::Mutex;
use tokio::{net::TcpListener, task::JoinHandle};

/// Shared state behind the mock yard API
pub struct YardState {
    motos: Mutex<Vec<Moto>>,
    next_id: AtomicI64,
    hits: AtomicUsize,
    failing: AtomicBool,
}

/// In-memory mock of the yard backend's moto collection
pub struct MockYardApi {
    state: Arc<YardState>,
    api_url: String,
    handle: JoinHandle<()>,
}

impl MockYardApi {
    /// Start the mock backend on a random local port
    pub async fn spawn() -> Self {
        let state = Arc::new(YardState {
            motos: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            hits: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        });

        let app = Router::new()
            .route("/api/moto", get(list_motos).post(create_moto))
            .route("/api/moto/{id}", get(get_moto).put(update_moto).delete(delete_moto))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { state, api_url: format!("http://{}/api/moto", addr), handle }
    }

    /// Base URL of the moto collection (probe target and CRUD base)
    pub fn api_url(&self) -> String {
        self.api_url.clone()
    }

    /// Total requests served so far (probes and CRUD alike)
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Make every subsequent request answer 500 (or stop doing so)
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Insert a record directly, bypassing HTTP
    pub fn seed(&self, moto: Moto) {
        self.state.motos.lock().push(moto);
    }

    /// Current collection contents
    pub fn records(&self) -> Vec<Moto> {
        self.state.motos.lock().clone()
    }

    /// Stop serving; subsequent connections are refused
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for MockYardApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": "induced failure" })))
        .into_response()
}

async fn list_motos(State(state): State<Arc<YardState>>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if state.failing.load(Ordering::SeqCst) {
        return failure();
    }
    (StatusCode::OK, Json(state.motos.lock().clone())).into_response()
}

async fn get_moto(State(state): State<Arc<YardState>>, Path(id): Path<i64>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if state.failing.load(Ordering::SeqCst) {
        return failure();
    }
    match state.motos.lock().iter().find(|m| m.id == id) {
        Some(moto) => (StatusCode::OK, Json(moto.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_moto(
    State(state): State<Arc<YardState>>,
    Json(request): Json<CreateMotoRequest>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if state.failing.load(Ordering::SeqCst) {
        return failure();
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let moto = Moto {
        id,
        modelo: request.modelo,
        iot_identificador: request.iot_identificador,
        data_entrada: chrono::Utc::now().to_rfc3339(),
        data_saida: None,
        setor_id: request.setor_id,
        setor_nome: format!("Setor {}", request.setor_id),
    };
    state.motos.lock().push(moto.clone());
    (StatusCode::CREATED, Json(moto)).into_response()
}

async fn update_moto(
    State(state): State<Arc<YardState>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMotoRequest>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if state.failing.load(Ordering::SeqCst) {
        return failure();
    }
    if request.id != id {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "body id does not match path id" })),
        )
            .into_response();
    }
    let mut motos = state.motos.lock();
    match motos.iter_mut().find(|m| m.id == id) {
        Some(moto) => {
            moto.modelo = request.modelo;
            moto.iot_identificador = request.iot_identificador;
            moto.setor_id = request.setor_id;
            moto.setor_nome = format!("Setor {}", request.setor_id);
            (StatusCode::OK, Json(moto.clone())).into_response()
        },
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_moto(State(state): State<Arc<YardState>>, Path(id): Path<i64>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if state.failing.load(Ordering::SeqCst) {
        return failure();
    }
    let mut motos = state.motos.lock();
    let before = motos.len();
    motos.retain(|m| m.id != id);
    if motos.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[derive(Clone)]
struct CountingState {
    hits: Arc<AtomicUsize>,
    status: StatusCode,
    delay: Duration,
}

/// Answers every request with a fixed status, counting hits
pub struct CountingServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl CountingServer {
    /// Start a server that immediately answers `status`
    pub async fn spawn(status: u16) -> Self {
        Self::spawn_with_delay(status, Duration::ZERO).await
    }

    /// Start a server that answers `status` after `delay`
    pub async fn spawn_with_delay(status: u16, delay: Duration) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = CountingState {
            hits: hits.clone(),
            status: StatusCode::from_u16(status).unwrap(),
            delay,
        };

        let app = Router::new().fallback(counting_handler).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url: format!("http://{}/api/moto", addr), hits, handle }
    }

    /// URL for this server's moto collection path
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    /// Requests served so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for CountingServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn counting_handler(State(state): State<CountingState>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, Json(serde_json::json!([]))).into_response()
}

/// Accepts connections but never writes a byte back
pub struct SilentServer {
    base_url: String,
    handle: JoinHandle<()>,
}

impl SilentServer {
    /// Start a server that holds every connection open without answering
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else { break };
                tokio::spawn(async move {
                    let _socket = socket;
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                });
            }
        });

        Self { base_url: format!("http://{}/api/moto", addr), handle }
    }

    /// URL for this server's moto collection path
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }
}

impl Drop for SilentServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A URL on a local port with nothing listening; connections are refused
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/moto", port)
}
