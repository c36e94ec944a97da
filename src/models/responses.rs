use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::chunking::TextChunk;
use crate::ingestion::processor::{BatchSummary, ProcessedFile};
use crate::models::{ChunkPage, DocumentSummary, ProcessedDocument, TextStats};

/// How many chunks the single-upload response embeds as a preview.
pub const SINGLE_UPLOAD_CHUNK_PREVIEW: usize = 5;
/// How many chunks each file in a batch response embeds as a preview.
pub const BATCH_UPLOAD_CHUNK_PREVIEW: usize = 3;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SingleUploadResponse {
    pub success: bool,
    pub message: String,
    pub data: FileUploadResult,
}

/// Per-file outcome as rendered to clients. `file_id` is absent when the
/// file was rejected before a record could be created (validation failure).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileUploadResult {
    pub file_id: Option<Uuid>,
    pub filename: String,
    pub success: bool,
    pub mime_type: String,
    pub file_size: i64,
    pub storage_url: Option<String>,
    pub extracted_text: String,
    pub text_stats: TextStats,
    pub chunks: Vec<TextChunk>,
    pub error: Option<String>,
}

impl FileUploadResult {
    pub fn from_processed(file: ProcessedFile, chunk_preview: usize) -> Self {
        let mut chunks = file.chunks;
        chunks.truncate(chunk_preview);
        Self {
            file_id: file.file_id,
            filename: file.original_name,
            success: file.success,
            mime_type: file.mime_type,
            file_size: file.file_size,
            storage_url: file.storage_url,
            extracted_text: file.extracted_text,
            text_stats: file.stats,
            chunks,
            error: file.error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchUploadResponse {
    pub success: bool,
    pub message: String,
    pub data: BatchUploadData,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchUploadData {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub results: Vec<FileUploadResult>,
}

impl From<BatchSummary> for BatchUploadResponse {
    fn from(summary: BatchSummary) -> Self {
        let message = format!(
            "Processed {}/{} files successfully",
            summary.succeeded, summary.total
        );
        Self {
            success: summary.succeeded > 0,
            message,
            data: BatchUploadData {
                total_files: summary.total,
                successful_files: summary.succeeded,
                failed_files: summary.failed,
                results: summary
                    .results
                    .into_iter()
                    .map(|file| FileUploadResult::from_processed(file, BATCH_UPLOAD_CHUNK_PREVIEW))
                    .collect(),
            },
        }
    }
}

/// Full stored record, served by `GET /result/{file_id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentResultResponse {
    pub file_id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub file_size: i64,
    pub storage_url: Option<String>,
    pub extracted_text: String,
    pub text_stats: TextStats,
    pub chunks: Vec<TextChunk>,
    pub status: crate::models::ProcessingStatus,
    pub error: Option<String>,
    pub extensions: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl DocumentResultResponse {
    pub fn from_document(document: ProcessedDocument, chunks: Vec<TextChunk>) -> Self {
        let text_stats = document.stats();
        Self {
            file_id: document.id,
            filename: document.original_filename,
            mime_type: document.mime_type,
            file_size: document.file_size,
            storage_url: document.storage_url,
            text_stats,
            extracted_text: document.extracted_text,
            chunks,
            status: document.status,
            error: document.error_message,
            extensions: document.extensions,
            created_at: document.created_at,
        }
    }
}

/// A page of chunks for one document, served by `GET /chunks/{file_id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChunkPageResponse {
    pub file_id: Uuid,
    pub filename: String,
    pub page: i64,
    pub limit: i64,
    pub total_chunks: i64,
    pub chunks: Vec<TextChunk>,
    pub has_more: bool,
}

impl ChunkPageResponse {
    pub fn from_page(
        file_id: Uuid,
        filename: String,
        page: i64,
        limit: i64,
        chunk_page: ChunkPage,
    ) -> Self {
        Self {
            file_id,
            filename,
            page,
            limit,
            total_chunks: chunk_page.total_chunks,
            chunks: chunk_page.chunks,
            has_more: chunk_page.has_more,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryPagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Paginated metadata-only listing, served by `GET /history`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub results: Vec<DocumentSummary>,
    pub pagination: HistoryPagination,
}

impl HistoryResponse {
    pub fn new(results: Vec<DocumentSummary>, page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            results,
            pagination: HistoryPagination {
                page,
                limit,
                total,
                pages,
            },
        }
    }
}
