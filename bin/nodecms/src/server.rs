//! Development server with a JSON content API and live reload support

use std::{
    convert::Infallible,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use nodecms_core::{BuildError, Node};
use nodecms_generator::{OverviewItem, collect_items};
use nodecms_parser::{load_content, resolve_api_path};
use serde_json::{Value, json};
use tokio::sync::broadcast;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tower_http::{cors::CorsLayer, services::ServeDir};

pub use nodecms_generator::LIVERELOAD_SCRIPT;

/// Live reload message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadMessage {
    /// Full page reload.
    Reload,
    /// Stylesheet-only reload.
    CssReload,
}

/// Server state: the reload broadcaster and the content roots the API
/// reads from.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Broadcast channel for live reload events.
    pub reload_tx: broadcast::Sender<ReloadMessage>,
    content_dir: PathBuf,
    collections_dir: PathBuf,
}

impl ServerState {
    /// Create a new server state.
    pub fn new(content_dir: impl Into<PathBuf>, collections_dir: impl Into<PathBuf>) -> Self {
        let (reload_tx, _) = broadcast::channel(16);
        Self {
            reload_tx,
            content_dir: content_dir.into(),
            collections_dir: collections_dir.into(),
        }
    }

    /// Send a reload notification to all connected clients.
    pub fn notify_reload(&self) {
        let _ = self.reload_tx.send(ReloadMessage::Reload);
    }

    /// Send a stylesheet reload notification.
    pub fn notify_css_reload(&self) {
        let _ = self.reload_tx.send(ReloadMessage::CssReload);
    }
}

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No content file for the requested path.
    #[error("No content found for '/{0}'")]
    NotFound(String),

    /// No directory for the requested collection.
    #[error("Collection '{0}' not found")]
    CollectionNotFound(String),

    /// The content file exists but could not be loaded.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) | Self::CollectionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Build(e) => {
                tracing::error!("{}", e.report());
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

/// Create the development server router.
pub fn create_router(output_dir: &Path, state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/api", get(api_root_handler))
        .route("/api/", get(api_root_handler))
        .route("/api/{*path}", get(api_handler))
        .fallback_service(ServeDir::new(output_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Server-Sent Events handler for live reload.
async fn livereload_handler(
    State(state): State<Arc<ServerState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.reload_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(ReloadMessage::Reload) => Some(Ok(Event::default().data("reload"))),
        Ok(ReloadMessage::CssReload) => Some(Ok(Event::default().data("css-reload"))),
        // Lagged receivers just miss a reload.
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

async fn api_root_handler(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, ApiError> {
    content_response(&state, "")
}

/// `GET /api/collections/{name}` lists a collection, any other path returns
/// the content node behind it.
async fn api_handler(
    State(state): State<Arc<ServerState>>,
    UrlPath(path): UrlPath<String>,
) -> Result<Json<Value>, ApiError> {
    match path.strip_prefix("collections/") {
        Some(name) if !name.is_empty() && !name.contains('/') => {
            collection_response(&state, name)
        }
        _ => content_response(&state, &path),
    }
}

fn content_response(state: &ServerState, path: &str) -> Result<Json<Value>, ApiError> {
    let file = resolve_api_path(&state.content_dir, path)
        .ok_or_else(|| ApiError::NotFound(path.to_string()))?;

    tracing::debug!(request = path, file = %file.display(), "Serving content");
    let node: Node = load_content(&file)?;
    Ok(Json(json!({ "data": node })))
}

fn collection_response(state: &ServerState, name: &str) -> Result<Json<Value>, ApiError> {
    let items: Vec<OverviewItem> = collect_items(&state.collections_dir, name)?
        .ok_or_else(|| ApiError::CollectionNotFound(name.to_string()))?;

    Ok(Json(json!({ "collection": name, "items": items })))
}
