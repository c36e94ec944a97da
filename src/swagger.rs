use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    chunking::TextChunk,
    models::{
        BatchUploadData, BatchUploadResponse, ChunkPageResponse, CreateUser,
        DocumentResultResponse, DocumentSummary, FileUploadResult, HistoryPagination,
        HistoryResponse, LoginRequest, LoginResponse, SingleUploadResponse, TextStats,
        UserResponse,
    },
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth endpoints
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        // Document pipeline endpoints
        crate::routes::documents::upload_single,
        crate::routes::documents::upload_multiple,
        crate::routes::documents::get_result,
        crate::routes::documents::get_chunks,
        crate::routes::documents::get_history,
    ),
    components(
        schemas(
            CreateUser, LoginRequest, LoginResponse, UserResponse,
            SingleUploadResponse, BatchUploadResponse, BatchUploadData, FileUploadResult,
            DocumentResultResponse, ChunkPageResponse, HistoryResponse, HistoryPagination,
            DocumentSummary, TextStats, TextChunk
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "documents", description = "Contract upload, OCR processing, and chunk retrieval"),
    ),
    info(
        title = "LexOCR API",
        version = "0.3.1",
        description = "Contract OCR processing and text chunking API",
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
pub struct ApiDoc;

pub fn create_swagger_router() -> Router<Arc<AppState>> {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
