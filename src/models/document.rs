use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::chunking::TextChunk;

/// Lifecycle of a processed document. Transitions are monotonic: a record
/// never returns to `Pending` once it has advanced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, ToSchema)]
pub enum ProcessingStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "processing")]
    Processing,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "failed")]
    Failed,
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStatus::Pending => write!(f, "pending"),
            ProcessingStatus::Processing => write!(f, "processing"),
            ProcessingStatus::Completed => write!(f, "completed"),
            ProcessingStatus::Failed => write!(f, "failed"),
        }
    }
}

impl TryFrom<String> for ProcessingStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(ProcessingStatus::Pending),
            "processing" => Ok(ProcessingStatus::Processing),
            "completed" => Ok(ProcessingStatus::Completed),
            "failed" => Ok(ProcessingStatus::Failed),
            _ => Err(format!("Invalid processing status: {}", value)),
        }
    }
}

/// Derived counters for one document's extracted text. All zero unless the
/// record completed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct TextStats {
    pub word_count: i32,
    pub character_count: i64,
    pub chunk_count: i32,
}

impl TextStats {
    /// Recomputes the stats from scratch; called whenever the stored text
    /// changes so the counters can never drift from the chunk list.
    pub fn derive(text: &str, chunks: &[TextChunk]) -> Self {
        Self {
            word_count: text.split_whitespace().count() as i32,
            character_count: text.chars().count() as i64,
            chunk_count: chunks.len() as i32,
        }
    }
}

/// One persisted extraction outcome. `id` is the external file handle,
/// assigned exactly once at ingest time, before any persistence attempt.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProcessedDocument {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub original_filename: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_hash: Option<String>,
    pub storage_url: Option<String>,
    pub extracted_text: String,
    pub word_count: i32,
    pub character_count: i64,
    pub chunk_count: i32,
    #[sqlx(try_from = "String")]
    pub status: ProcessingStatus,
    pub error_message: Option<String>,
    /// Opaque per-feature payloads appended by downstream analyzers
    /// (analysis, summary, entities). The pipeline round-trips these
    /// unchanged.
    pub extensions: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProcessedDocument {
    pub fn stats(&self) -> TextStats {
        TextStats {
            word_count: self.word_count,
            character_count: self.character_count,
            chunk_count: self.chunk_count,
        }
    }
}

/// Metadata-only projection used by the history listing; deliberately
/// excludes the text and chunks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub original_filename: String,
    pub mime_type: String,
    pub file_size: i64,
    #[sqlx(try_from = "String")]
    pub status: ProcessingStatus,
    pub word_count: i32,
    pub character_count: i64,
    pub chunk_count: i32,
    pub created_at: DateTime<Utc>,
}

/// A page of stored chunks, as returned by the result store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChunkPage {
    pub chunks: Vec<TextChunk>,
    pub total_chunks: i64,
    pub has_more: bool,
}
