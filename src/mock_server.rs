//! In-memory implementation of the resource service, for local runs and tests.
//!
//! Routes, relative to the mount point:
//! - `GET /{collection}`: whole collection as a JSON array
//! - `POST /{collection}`: append a record carrying its own `id`
//! - `PUT /{collection}/{id}`: replace the record
//! - `DELETE /{collection}/{id}`: remove the record

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::transport::{BackendError, MemoryBackend};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    timestamp: String,
}

impl BackendError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BackendError::NotFound { .. } => StatusCode::NOT_FOUND,
            BackendError::MissingId | BackendError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        (status, Json(body)).into_response()
    }
}

/// Router serving `backend` under `/api`, plus `/health`.
pub fn router(backend: MemoryBackend) -> Router {
    let api = Router::new()
        .route("/:collection", get(list_records).post(create_record))
        .route("/:collection/:id", axum::routing::put(update_record).delete(delete_record));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(backend)
}

async fn list_records(
    State(backend): State<MemoryBackend>,
    Path(collection): Path<String>,
) -> Json<Vec<Value>> {
    Json(backend.all(&collection))
}

async fn create_record(
    State(backend): State<MemoryBackend>,
    Path(collection): Path<String>,
    Json(record): Json<Value>,
) -> Result<(StatusCode, Json<Value>), BackendError> {
    let created = backend.insert(&collection, record)?;
    info!(collection = %collection, "Record created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_record(
    State(backend): State<MemoryBackend>,
    Path((collection, id)): Path<(String, String)>,
    Json(record): Json<Value>,
) -> Result<Json<Value>, BackendError> {
    let updated = backend.replace(&collection, &id, record)?;
    info!(collection = %collection, id = %id, "Record replaced");
    Ok(Json(updated))
}

async fn delete_record(
    State(backend): State<MemoryBackend>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, BackendError> {
    backend.remove(&collection, &id)?;
    info!(collection = %collection, id = %id, "Record deleted");
    Ok(StatusCode::NO_CONTENT)
}
