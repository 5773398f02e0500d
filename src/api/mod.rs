//! HTTP layer - axum routes for members, categories and the gallery.
//!
//! Handlers stay thin: decode the request, call into [`crate::core`], and turn the result
//! into a response. Member and category failures collapse to plain-text bodies (400 for bad
//! input, 404 for missing records, a generic 500 otherwise); the gallery endpoints answer
//! with structured JSON bodies instead.

/// Category endpoints
pub mod categories;
/// Gallery endpoints
pub mod gallery;
/// Member endpoints
pub mod members;
/// Multipart form decoding
pub mod multipart;

use crate::{
    config::AppConfig,
    core::UploadStore,
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Where uploaded images live
    pub uploads: UploadStore,
}

impl AppState {
    /// Bundles the connection and the upload store.
    #[must_use]
    pub const fn new(db: DatabaseConnection, uploads: UploadStore) -> Self {
        Self { db, uploads }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            (StatusCode::BAD_REQUEST, self.to_string()).into_response()
        } else if self.is_not_found() {
            (StatusCode::NOT_FOUND, self.to_string()).into_response()
        } else {
            error!("Request failed: {}", self);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Builds the application router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let uploads = ServeDir::new(state.uploads.root());
    let uploads_prefix = state.uploads.public_prefix().to_string();

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/members",
            get(members::list_members)
                .post(members::create_member)
                .delete(members::delete_members),
        )
        .route("/api/members/:id", put(members::replace_member))
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/gallery",
            get(gallery::list_gallery)
                .post(gallery::upload_gallery_image)
                .delete(gallery::delete_gallery_image),
        )
        .nest_service(&uploads_prefix, uploads)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if the address is invalid, the upload directory cannot be created, or
/// the listener fails.
pub async fn serve(config: &AppConfig, db: DatabaseConnection) -> Result<()> {
    let uploads = UploadStore::new(&config.storage.upload_dir, &config.storage.public_prefix)?;
    uploads.ensure_root().await?;

    let addr: SocketAddr = config.server.bind_addr.parse().map_err(|e| Error::Config {
        message: format!("Invalid bind address '{}': {e}", config.server.bind_addr),
    })?;

    let app = router(AppState::new(db, uploads), config.storage.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    () = ctrl_c => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
