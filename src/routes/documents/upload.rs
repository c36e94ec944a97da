use axum::{
    extract::{Multipart, State},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    auth::AuthUser,
    errors::document::DocumentError,
    ingestion::processor::{DocumentProcessor, FileFailureKind, ProcessedFile, UploadedFile},
    models::{
        BatchUploadResponse, FileUploadResult, SingleUploadResponse, SINGLE_UPLOAD_CHUNK_PREVIEW,
    },
    services::file_service::FileService,
    AppState,
};
use super::types::MAX_BATCH_FILES;

fn build_processor(state: &AppState) -> DocumentProcessor {
    DocumentProcessor::new(
        state.db.clone(),
        FileService::new(state.config.temp_path.clone()),
        state.extractor.clone(),
        state.storage.clone(),
        &state.config,
    )
}

/// Pulls every file out of a multipart body. Both upload endpoints share
/// this; they differ only in the field name and how many files they accept.
async fn collect_files(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Vec<UploadedFile>, DocumentError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        DocumentError::MalformedRequest {
            message: e.to_string(),
        }
    })? {
        if field.name() != Some(field_name) {
            continue;
        }

        let original_name = field
            .file_name()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_default();
        let data = field.bytes().await.map_err(|e| {
            error!("Failed to read file data for '{}': {}", original_name, e);
            DocumentError::MalformedRequest {
                message: e.to_string(),
            }
        })?;

        files.push(UploadedFile {
            original_name,
            mime_type,
            data: data.to_vec(),
        });
    }

    Ok(files)
}

/// Upload and process one contract file.
#[utoipa::path(
    post,
    path = "/api/documents/upload-single",
    tag = "documents",
    security(
        ("bearer_auth" = [])
    ),
    request_body(content = String, description = "Multipart form with a `file` field", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File processed; the body carries the file's own success flag", body = SingleUploadResponse),
        (status = 400, description = "Missing file or unsupported type"),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Result could not be persisted")
    )
)]
pub async fn upload_single(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<SingleUploadResponse>, DocumentError> {
    let mut files = collect_files(&mut multipart, "file").await?;
    let file = files.pop().ok_or(DocumentError::MissingFile)?;

    info!(
        "Single upload '{}' ({} bytes) for user {}",
        file.original_name,
        file.data.len(),
        auth_user.user.id
    );

    let processor = build_processor(&state);
    let processed = processor.process_file(file, auth_user.user.id).await;

    // Validation and store failures surface as HTTP errors here; an
    // extraction failure is a successful request whose body says so.
    match processed.failure_kind {
        Some(FileFailureKind::UnsupportedType) => Err(DocumentError::UnsupportedType {
            mime_type: processed.mime_type,
        }),
        Some(FileFailureKind::FileTooLarge) => Err(DocumentError::FileTooLarge {
            size: processed.file_size as u64,
            max_bytes: state.config.max_file_size_bytes(),
        }),
        Some(FileFailureKind::Store) => Err(DocumentError::StorageWriteFailed {
            message: processed.error.unwrap_or_default(),
        }),
        Some(FileFailureKind::Extraction) | None => Ok(Json(render_single(processed))),
    }
}

fn render_single(processed: ProcessedFile) -> SingleUploadResponse {
    let success = processed.success;
    SingleUploadResponse {
        success,
        message: if success {
            "File processed successfully".to_string()
        } else {
            "Failed to process file".to_string()
        },
        data: FileUploadResult::from_processed(processed, SINGLE_UPLOAD_CHUNK_PREVIEW),
    }
}

/// Upload and process up to ten contract files in one request.
#[utoipa::path(
    post,
    path = "/api/documents/upload-multiple",
    tag = "documents",
    security(
        ("bearer_auth" = [])
    ),
    request_body(content = String, description = "Multipart form with repeated `files` fields", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Batch processed; always 200 with per-file outcomes", body = BatchUploadResponse),
        (status = 400, description = "No files, or more than the batch limit"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upload_multiple(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<BatchUploadResponse>, DocumentError> {
    let files = collect_files(&mut multipart, "files").await?;

    if files.is_empty() {
        return Err(DocumentError::MissingFile);
    }
    if files.len() > MAX_BATCH_FILES {
        return Err(DocumentError::TooManyFiles {
            count: files.len(),
            max: MAX_BATCH_FILES,
        });
    }

    info!(
        "Batch upload of {} files for user {}",
        files.len(),
        auth_user.user.id
    );

    let processor = build_processor(&state);
    let summary = processor.process_batch(files, auth_user.user.id).await;

    // Partial failure is still a 200; clients read the per-file flags.
    Ok(Json(BatchUploadResponse::from(summary)))
}
