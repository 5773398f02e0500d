//! Shared test utilities.
//!
//! Helpers for setting up in-memory databases, temporary upload stores, routers, and
//! hand-built multipart bodies.

use crate::{
    api::{AppState, router},
    core::{UploadStore, member},
    entities,
    errors::Result,
};
use axum::{Router, response::Response};
use serde::de::DeserializeOwned;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Boundary used by [`MultipartBody`].
pub const BOUNDARY: &str = "party-admin-test-boundary";

/// Routes test logs through the test harness writer.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Member input with only a name set.
pub fn member_input(name: &str) -> member::MemberInput {
    member::MemberInput {
        name: name.to_string(),
        ..Default::default()
    }
}

/// Creates a member with only a name.
pub async fn create_test_member(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::member::Model> {
    member::create_member(db, &member_input(name)).await
}

/// A router over a fresh database and a temporary upload directory.
///
/// Keep the returned `TempDir` alive for as long as the router is used.
pub async fn setup_test_app() -> Result<(Router, AppState, TempDir)> {
    init_test_tracing();
    let db = setup_test_db().await?;
    let dir = tempfile::tempdir()?;
    let uploads = UploadStore::new(dir.path().join("uploads"), "/uploads")?;
    let state = AppState::new(db, uploads);
    let app = router(state.clone(), 1024 * 1024);
    Ok((app, state, dir))
}

/// Collects a response body.
#[allow(clippy::unwrap_used)]
pub async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Collects a response body and decodes it as JSON.
#[allow(clippy::unwrap_used)]
pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    serde_json::from_slice(&read_body(response).await).unwrap()
}

/// Minimal multipart/form-data body builder for driving handlers directly.
#[derive(Debug, Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Starts an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text part.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Appends a file part.
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// Closes the body.
    pub fn finish(mut self) -> Vec<u8> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.bytes
    }

    /// `Content-Type` header value matching [`BOUNDARY`].
    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }
}
