use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::chunking::{self, ChunkingError, TextChunk};
use crate::config::Config;
use crate::db::Database;
use crate::extractor::TextExtractor;
use crate::models::{ProcessedDocument, ProcessingStatus, TextStats};
use crate::services::file_service::FileService;
use crate::services::storage_service::StorageService;

/// One file as received from the HTTP layer, before any validation.
#[derive(Debug)]
pub struct UploadedFile {
    pub original_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Classifies why a file did not complete, so the HTTP layer can pick the
/// right status code without re-deriving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFailureKind {
    /// Rejected before extraction; no record was persisted.
    UnsupportedType,
    /// Rejected before extraction; no record was persisted.
    FileTooLarge,
    /// Extraction (or staging) failed; a failed record was persisted.
    Extraction,
    /// The record itself could not be persisted.
    Store,
}

/// Outcome of one file's trip through the pipeline. `file_id` is `None`
/// only for validation rejects, which never reach persistence.
#[derive(Debug)]
pub struct ProcessedFile {
    pub file_id: Option<Uuid>,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub storage_url: Option<String>,
    pub extracted_text: String,
    pub stats: TextStats,
    pub chunks: Vec<TextChunk>,
    pub success: bool,
    pub failure_kind: Option<FileFailureKind>,
    pub error: Option<String>,
}

impl ProcessedFile {
    fn rejected(file: &UploadedFile, mime_type: String, kind: FileFailureKind, error: String) -> Self {
        Self {
            file_id: None,
            original_name: file.original_name.clone(),
            mime_type,
            file_size: file.data.len() as i64,
            storage_url: None,
            extracted_text: String::new(),
            stats: TextStats::default(),
            chunks: Vec::new(),
            success: false,
            failure_kind: Some(kind),
            error: Some(error),
        }
    }
}

#[derive(Debug)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<ProcessedFile>,
}

/// Intermediate result of extraction + chunking + mirroring, before the
/// record is written.
struct PipelineOutcome {
    text: String,
    chunks: Vec<TextChunk>,
    storage_url: Option<String>,
    error: Option<String>,
}

impl PipelineOutcome {
    fn failed(error: String) -> Self {
        Self {
            text: String::new(),
            chunks: Vec::new(),
            storage_url: None,
            error: Some(error),
        }
    }
}

/// Drives each upload through the per-file state machine:
/// received -> validated -> staged -> extracted -> chunked ->
/// (best-effort mirrored) -> persisted.
///
/// Files in a batch are processed sequentially; the result list always
/// mirrors input order, and one file's failure never aborts the rest.
pub struct DocumentProcessor {
    db: Database,
    file_service: FileService,
    extractor: Arc<dyn TextExtractor>,
    storage: Option<Arc<StorageService>>,
    allowed_mime_types: Vec<String>,
    max_file_size_bytes: u64,
    chunk_window_words: usize,
    chunk_overlap_words: usize,
}

impl DocumentProcessor {
    pub fn new(
        db: Database,
        file_service: FileService,
        extractor: Arc<dyn TextExtractor>,
        storage: Option<Arc<StorageService>>,
        config: &Config,
    ) -> Self {
        Self {
            db,
            file_service,
            extractor,
            storage,
            allowed_mime_types: config.allowed_mime_types.clone(),
            max_file_size_bytes: config.max_file_size_bytes(),
            chunk_window_words: config.chunk_window_words,
            chunk_overlap_words: config.chunk_overlap_words,
        }
    }

    pub async fn process_batch(&self, files: Vec<UploadedFile>, user_id: Uuid) -> BatchSummary {
        let total = files.len();
        let mut results = Vec::with_capacity(total);

        for file in files {
            let result = self.process_file(file, user_id).await;
            results.push(result);
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        BatchSummary {
            total,
            succeeded,
            failed: total - succeeded,
            results,
        }
    }

    pub async fn process_file(&self, file: UploadedFile, user_id: Uuid) -> ProcessedFile {
        let mime_type = resolve_mime_type(&file.original_name, &file.data, &file.mime_type);

        if !self.allowed_mime_types.contains(&mime_type) {
            info!(
                "Rejecting '{}': unsupported type {}",
                file.original_name, mime_type
            );
            return ProcessedFile::rejected(
                &file,
                mime_type.clone(),
                FileFailureKind::UnsupportedType,
                format!("Unsupported file type: {}", mime_type),
            );
        }

        if file.data.len() as u64 > self.max_file_size_bytes {
            info!(
                "Rejecting '{}': {} bytes exceeds the {} byte limit",
                file.original_name,
                file.data.len(),
                self.max_file_size_bytes
            );
            return ProcessedFile::rejected(
                &file,
                mime_type.clone(),
                FileFailureKind::FileTooLarge,
                format!(
                    "File exceeds the maximum size of {} bytes",
                    self.max_file_size_bytes
                ),
            );
        }

        // The external handle exists before anything can fail, so even a
        // failed run leaves a record to refer back to.
        let file_id = Uuid::new_v4();
        let file_hash = FileService::content_hash(&file.data);

        let (outcome, staged_name) = match self
            .file_service
            .save_temp_file(&file.original_name, &file.data)
            .await
        {
            Ok(temp_path) => {
                let staged_name = temp_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(&file.original_name)
                    .to_string();

                let outcome = self
                    .run_extraction(file_id, &temp_path, &file.original_name, &mime_type)
                    .await;

                // Release the staged copy on every path, success or not.
                self.file_service.delete_temp_file(&temp_path).await;
                (outcome, staged_name)
            }
            Err(e) => {
                warn!("Failed to stage upload '{}': {}", file.original_name, e);
                (
                    PipelineOutcome::failed(format!("failed to stage upload: {}", e)),
                    file.original_name.clone(),
                )
            }
        };

        self.persist_outcome(file_id, &file, mime_type, staged_name, file_hash, outcome, user_id)
            .await
    }

    /// Extraction, chunking, and the best-effort object-storage mirror, in
    /// that order. Returns a failed outcome instead of erroring so the
    /// caller can persist it.
    async fn run_extraction(
        &self,
        file_id: Uuid,
        temp_path: &Path,
        original_name: &str,
        mime_type: &str,
    ) -> PipelineOutcome {
        let extraction = self.extractor.extract(temp_path, mime_type).await;
        if !extraction.success {
            return PipelineOutcome::failed(
                extraction
                    .error_message()
                    .unwrap_or_else(|| "extraction failed".to_string()),
            );
        }

        let chunks = match chunking::chunk_text(
            &extraction.text,
            self.chunk_window_words,
            self.chunk_overlap_words,
        ) {
            Ok(chunks) => chunks,
            Err(ChunkingError::EmptyText) => {
                // Completed records must carry at least one chunk, so an
                // empty extraction is recorded as a failure.
                return PipelineOutcome::failed("no text was extracted".to_string());
            }
            Err(e @ ChunkingError::InvalidParameters { .. }) => {
                error!("Chunking misconfiguration: {}", e);
                return PipelineOutcome::failed(format!("chunking failed: {}", e));
            }
        };

        let storage_url = match &self.storage {
            Some(storage) => {
                match storage
                    .upload_original(temp_path, file_id, original_name, mime_type)
                    .await
                {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!("Best-effort storage mirror failed for {}: {}", file_id, e);
                        None
                    }
                }
            }
            None => None,
        };

        PipelineOutcome {
            text: extraction.text,
            chunks,
            storage_url,
            error: None,
        }
    }

    async fn persist_outcome(
        &self,
        file_id: Uuid,
        file: &UploadedFile,
        mime_type: String,
        staged_name: String,
        file_hash: String,
        outcome: PipelineOutcome,
        user_id: Uuid,
    ) -> ProcessedFile {
        let completed = outcome.error.is_none();
        let stats = if completed {
            TextStats::derive(&outcome.text, &outcome.chunks)
        } else {
            TextStats::default()
        };

        let now = chrono::Utc::now();
        let document = ProcessedDocument {
            id: file_id,
            user_id,
            filename: staged_name,
            original_filename: file.original_name.clone(),
            mime_type: mime_type.clone(),
            file_size: file.data.len() as i64,
            file_hash: Some(file_hash),
            storage_url: outcome.storage_url.clone(),
            extracted_text: outcome.text.clone(),
            word_count: stats.word_count,
            character_count: stats.character_count,
            chunk_count: stats.chunk_count,
            status: if completed {
                ProcessingStatus::Completed
            } else {
                ProcessingStatus::Failed
            },
            error_message: outcome.error.clone(),
            extensions: None,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.db.create_document(&document, &outcome.chunks).await {
            error!("Failed to persist document {}: {}", file_id, e);
            return ProcessedFile {
                file_id: Some(file_id),
                original_name: file.original_name.clone(),
                mime_type,
                file_size: file.data.len() as i64,
                storage_url: outcome.storage_url,
                extracted_text: String::new(),
                stats: TextStats::default(),
                chunks: Vec::new(),
                success: false,
                failure_kind: Some(FileFailureKind::Store),
                error: Some(format!("failed to persist result: {}", e)),
            };
        }

        if completed {
            info!(
                "Processed '{}' as {} ({} words, {} chunks)",
                file.original_name, file_id, stats.word_count, stats.chunk_count
            );
        } else {
            info!(
                "Recorded failed extraction for '{}' as {}",
                file.original_name, file_id
            );
        }

        ProcessedFile {
            file_id: Some(file_id),
            original_name: file.original_name.clone(),
            mime_type,
            file_size: file.data.len() as i64,
            storage_url: outcome.storage_url,
            extracted_text: outcome.text,
            stats,
            chunks: outcome.chunks,
            success: completed,
            failure_kind: if completed {
                None
            } else {
                Some(FileFailureKind::Extraction)
            },
            error: outcome.error,
        }
    }
}

/// Effective MIME type for validation: the client's declared type wins,
/// falling back to content sniffing and then the filename extension when
/// the declaration is missing or generic.
pub fn resolve_mime_type(original_name: &str, data: &[u8], declared: &str) -> String {
    let declared = declared.trim().to_lowercase();
    if !declared.is_empty() && declared != "application/octet-stream" {
        return declared;
    }

    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }

    mime_guess::from_path(original_name)
        .first_raw()
        .map(|m| m.to_lowercase())
        .unwrap_or(declared)
}
