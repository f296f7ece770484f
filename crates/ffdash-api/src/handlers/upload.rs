//! Workbook upload handler
//!
//! The multipart field `excelFile` is spooled to a temporary file, ingested
//! on the blocking pool, and the temporary file is removed when the upload
//! finishes, whatever the outcome.

use std::io::Write;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use ffdash_core::{ingest, IngestError, IngestSummary};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the workbook
pub const UPLOAD_FIELD: &str = "excelFile";

/// Extension assumed when the client sends no usable file name
const DEFAULT_EXTENSION: &str = "xlsx";

/// Response for a successful upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    /// Rows written per table
    #[serde(flatten)]
    pub summary: IngestSummary,
}

/// A received workbook, not yet on disk
struct PendingUpload {
    extension: String,
    data: Bytes,
}

/// POST /api/upload
/// Replace the store contents with an uploaded workbook
pub async fn upload_workbook(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut pending: Option<PendingUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            tracing::debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }
        if pending.is_some() {
            return Err(ApiError::BadRequest(format!(
                "Only one '{}' file may be uploaded",
                UPLOAD_FIELD
            )));
        }

        let extension = upload_extension(field.file_name());
        let data = field.bytes().await.map_err(multipart_error)?;

        // browsers send an empty part when no file was picked
        if data.is_empty() {
            continue;
        }
        pending = Some(PendingUpload { extension, data });
    }

    let upload = pending.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;
    let size = upload.data.len();

    let summary = state
        .blocking(move |store| -> Result<IngestSummary, IngestError> {
            let file = spool(&upload)?;
            let result = ingest::ingest_file(store, file.path());
            drop(file);
            result
        })
        .await??;

    tracing::info!(
        size,
        weekly_results = summary.weekly_results,
        coach_lookup = summary.coach_lookup,
        "Workbook uploaded"
    );

    Ok(Json(UploadResponse {
        message: "Data uploaded successfully".to_string(),
        summary,
    }))
}

/// Keep the status axum assigns, so an oversized body is a 413
fn multipart_error(err: MultipartError) -> ApiError {
    let message = format!("Malformed upload: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else {
        ApiError::BadRequest(message)
    }
}

/// Write the upload to a temporary file carrying the client's extension,
/// which the workbook reader uses to pick a format
fn spool(upload: &PendingUpload) -> Result<NamedTempFile, IngestError> {
    let mut file = tempfile::Builder::new()
        .prefix("ffdash-upload-")
        .suffix(&format!(".{}", upload.extension))
        .tempfile()?;
    file.write_all(&upload.data)?;
    file.flush()?;
    Ok(file)
}

/// Lower-cased alphanumeric extension of the client file name
fn upload_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}
