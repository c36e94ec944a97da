use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    errors::document::DocumentError,
    models::{ChunkPageResponse, DocumentResultResponse, HistoryResponse},
    AppState,
};
use super::types::PageQuery;

/// Fetch the full stored record for one processed file.
#[utoipa::path(
    get,
    path = "/api/documents/result/{file_id}",
    tag = "documents",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("file_id" = Uuid, Path, description = "File handle returned at upload time")
    ),
    responses(
        (status = 200, description = "Stored extraction record", body = DocumentResultResponse),
        (status = 404, description = "Unknown file id, or owned by another account"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(file_id): Path<Uuid>,
) -> Result<Json<DocumentResultResponse>, DocumentError> {
    let document = state
        .db
        .get_document_by_id(file_id, auth_user.user.id)
        .await
        .map_err(|e| {
            error!("Database error getting document {}: {}", file_id, e);
            DocumentError::Internal {
                message: e.to_string(),
            }
        })?
        .ok_or(DocumentError::NotFound)?;

    let chunks = state
        .db
        .get_document_chunks(document.id)
        .await
        .map_err(|e| {
            error!("Database error getting chunks for {}: {}", file_id, e);
            DocumentError::Internal {
                message: e.to_string(),
            }
        })?;

    Ok(Json(DocumentResultResponse::from_document(document, chunks)))
}

/// Fetch one page of a document's stored chunks. Safe to call repeatedly;
/// reading never mutates the record.
#[utoipa::path(
    get,
    path = "/api/documents/chunks/{file_id}",
    tag = "documents",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("file_id" = Uuid, Path, description = "File handle returned at upload time"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of chunks", body = ChunkPageResponse),
        (status = 404, description = "Unknown file id, or owned by another account"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_chunks(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(file_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ChunkPageResponse>, DocumentError> {
    let page = query.page();
    let limit = query.limit();

    let (document, chunk_page) = state
        .db
        .get_document_chunks_page(file_id, auth_user.user.id, page, limit)
        .await
        .map_err(|e| {
            error!("Database error paging chunks for {}: {}", file_id, e);
            DocumentError::Internal {
                message: e.to_string(),
            }
        })?
        .ok_or(DocumentError::NotFound)?;

    Ok(Json(ChunkPageResponse::from_page(
        document.id,
        document.original_filename,
        page,
        limit,
        chunk_page,
    )))
}

/// List the caller's processing history, newest first. Metadata only; the
/// text and chunks stay behind the result and chunks endpoints.
#[utoipa::path(
    get,
    path = "/api/documents/history",
    tag = "documents",
    security(
        ("bearer_auth" = [])
    ),
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated processing history", body = HistoryResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<HistoryResponse>, DocumentError> {
    let page = query.page();
    let limit = query.limit();

    let results = state
        .db
        .list_documents_by_owner(auth_user.user.id, page, limit)
        .await
        .map_err(|e| {
            error!("Database error listing history: {}", e);
            DocumentError::Internal {
                message: e.to_string(),
            }
        })?;

    let total = state
        .db
        .count_documents_by_owner(auth_user.user.id)
        .await
        .map_err(|e| {
            error!("Database error counting history: {}", e);
            DocumentError::Internal {
                message: e.to_string(),
            }
        })?;

    Ok(Json(HistoryResponse::new(results, page, limit, total)))
}
