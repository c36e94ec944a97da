use axum::http::StatusCode;
use thiserror::Error;

use super::AppError;

/// Errors surfaced by the document pipeline's HTTP handlers. Extraction
/// failures are NOT errors at this level: they are persisted as failed
/// records and reported inside a 2xx body.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("no file was provided in the upload")]
    MissingFile,

    #[error("malformed multipart request: {message}")]
    MalformedRequest { message: String },

    #[error("unsupported file type: {mime_type}")]
    UnsupportedType { mime_type: String },

    #[error("file of {size} bytes exceeds the {max_bytes} byte limit")]
    FileTooLarge { size: u64, max_bytes: u64 },

    #[error("too many files: {count} exceeds the batch limit of {max}")]
    TooManyFiles { count: usize, max: usize },

    #[error("document not found")]
    NotFound,

    #[error("failed to persist document record: {message}")]
    StorageWriteFailed { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AppError for DocumentError {
    fn status_code(&self) -> StatusCode {
        match self {
            DocumentError::MissingFile => StatusCode::BAD_REQUEST,
            DocumentError::MalformedRequest { .. } => StatusCode::BAD_REQUEST,
            DocumentError::UnsupportedType { .. } => StatusCode::BAD_REQUEST,
            DocumentError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            DocumentError::TooManyFiles { .. } => StatusCode::BAD_REQUEST,
            DocumentError::NotFound => StatusCode::NOT_FOUND,
            DocumentError::StorageWriteFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DocumentError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            DocumentError::MissingFile => "No file uploaded".to_string(),
            DocumentError::MalformedRequest { message } => {
                format!("Malformed upload request: {}", message)
            }
            DocumentError::UnsupportedType { .. } => {
                "Unsupported file type. Please upload images (JPEG, PNG) or PDF files.".to_string()
            }
            DocumentError::FileTooLarge { max_bytes, .. } => {
                format!("File exceeds the maximum size of {} MB", max_bytes / (1024 * 1024))
            }
            DocumentError::TooManyFiles { max, .. } => {
                format!("Too many files; at most {} files per batch", max)
            }
            DocumentError::NotFound => "OCR result not found".to_string(),
            DocumentError::StorageWriteFailed { .. } => {
                "Failed to save the processing result".to_string()
            }
            DocumentError::Internal { .. } => "An internal error occurred".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DocumentError::MissingFile => "MISSING_FILE",
            DocumentError::MalformedRequest { .. } => "MALFORMED_REQUEST",
            DocumentError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            DocumentError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            DocumentError::TooManyFiles { .. } => "TOO_MANY_FILES",
            DocumentError::NotFound => "NOT_FOUND",
            DocumentError::StorageWriteFailed { .. } => "STORAGE_WRITE_FAILED",
            DocumentError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

super::impl_into_response!(DocumentError);
