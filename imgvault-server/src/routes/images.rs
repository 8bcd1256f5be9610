//! Image endpoints
//!
//! Upload takes the raw request body as the image and the Content-Type
//! header as the MIME label; fetch streams back decompressed bytes under
//! the stored MIME. Listing never decompresses.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use imgvault_store::DeleteOutcome;

use crate::error::ApiError;
use crate::state::AppState;

/// Fallback MIME label when the client sends no Content-Type
const DEFAULT_MIME: &str = "application/octet-stream";

/// Upload response
#[derive(Serialize)]
pub struct UploadResponse {
    pub name: String,
    pub mime: String,
    /// Size of the compressed payload as persisted
    pub stored_bytes: usize,
}

/// Delete response mirroring the driver's delete outcome
#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub removed: u64,
}

/// One row in the listing
#[derive(Serialize)]
pub struct ImageSummary {
    pub name: String,
    pub mime: String,
    pub stored_bytes: usize,
}

/// POST /images/{name} - store the request body under `name`
async fn upload_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest {
            message: "image body cannot be empty".into(),
        });
    }

    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_MIME)
        .to_owned();

    let driver = state.driver();
    let stored = driver.compress(&body)?;
    driver.insert(&stored, &name, &mime).await?;

    tracing::info!(%name, %mime, raw_bytes = body.len(), stored_bytes = stored.len(), "image stored");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            name,
            mime,
            stored_bytes: stored.len(),
        }),
    ))
}

/// GET /images/{name} - decompressed bytes under the stored MIME
async fn fetch_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let image = state.driver().fetch(&name).await?;

    Ok(([(header::CONTENT_TYPE, image.mime)], image.bytes).into_response())
}

/// DELETE /images/{name} - remove every row matching `name`
async fn delete_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let outcome = state.driver().delete(&name).await?;

    Ok(Json(DeleteResponse {
        deleted: matches!(outcome, DeleteOutcome::Removed(_)),
        removed: outcome.removed(),
    }))
}

/// GET /images - list stored rows without decompressing payloads
async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<ImageSummary>>, ApiError> {
    let rows = state.driver().fetch_all().await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| ImageSummary {
                name: row.name,
                mime: row.mime,
                stored_bytes: row.image.len(),
            })
            .collect(),
    ))
}

/// Image routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", get(list_images))
        .route(
            "/images/{name}",
            get(fetch_image).post(upload_image).delete(delete_image),
        )
}
