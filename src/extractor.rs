use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{error, info, warn};

/// How much raw process output is retained alongside a malformed-output
/// failure before truncation.
const RAW_OUTPUT_RETAIN_BYTES: usize = 4096;

/// Stdout contract of the external extraction script: a single JSON object
/// on exit code 0. Anything else is a contract violation.
#[derive(Debug, Deserialize)]
pub struct ExtractionWireResult {
    pub success: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub word_count: i64,
    #[serde(default)]
    pub text_length: i64,
    #[serde(default)]
    pub chunk_count: i64,
    #[serde(default)]
    pub chunks: Vec<WireChunk>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Chunk records as the script emits them. The pipeline re-chunks the text
/// itself, so these only participate in contract validation.
#[derive(Debug, Deserialize)]
pub struct WireChunk {
    pub index: i64,
    pub content: String,
    #[serde(default)]
    pub length: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    FileNotFound,
    SpawnFailed,
    ExtractionFailed,
    Timeout,
    MalformedOutput,
}

impl std::fmt::Display for ExtractionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionErrorKind::FileNotFound => write!(f, "file_not_found"),
            ExtractionErrorKind::SpawnFailed => write!(f, "process_spawn_failed"),
            ExtractionErrorKind::ExtractionFailed => write!(f, "extraction_failed"),
            ExtractionErrorKind::Timeout => write!(f, "extraction_timeout"),
            ExtractionErrorKind::MalformedOutput => write!(f, "malformed_output"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionFailure {
    pub kind: ExtractionErrorKind,
    pub message: String,
}

/// Uniform result of one extraction attempt. The adapter never returns an
/// `Err`: every failure mode is folded into this shape so callers can
/// persist a failed record without special cases.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub success: bool,
    pub text: String,
    pub failure: Option<ExtractionFailure>,
}

impl ExtractionOutcome {
    pub fn succeeded(text: String) -> Self {
        Self {
            success: true,
            text,
            failure: None,
        }
    }

    pub fn failed(kind: ExtractionErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            text: String::new(),
            failure: Some(ExtractionFailure {
                kind,
                message: message.into(),
            }),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.failure
            .as_ref()
            .map(|f| format!("{}: {}", f.kind, f.message))
    }
}

/// Seam between the pipeline and the extraction backend. The production
/// implementation shells out to a Python script; tests substitute stub
/// scripts, and an in-process backend could be dropped in without touching
/// the orchestrator.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, file_path: &Path, mime_type: &str) -> ExtractionOutcome;
}

/// Invokes the external OCR script as `<python> <script> <file> <mime>` and
/// parses its stdout JSON. One attempt per call; retry policy, if any,
/// belongs to the caller.
pub struct PythonOcrExtractor {
    python_binary: String,
    script_path: String,
    timeout: Duration,
}

impl PythonOcrExtractor {
    pub fn new(python_binary: String, script_path: String, timeout: Duration) -> Self {
        Self {
            python_binary,
            script_path,
            timeout,
        }
    }
}

#[async_trait]
impl TextExtractor for PythonOcrExtractor {
    async fn extract(&self, file_path: &Path, mime_type: &str) -> ExtractionOutcome {
        if !file_path.exists() {
            return ExtractionOutcome::failed(
                ExtractionErrorKind::FileNotFound,
                format!("file not found: {}", file_path.display()),
            );
        }

        info!(
            "Starting OCR process for {} ({})",
            file_path.display(),
            mime_type
        );

        let child = Command::new(&self.python_binary)
            .arg(&self.script_path)
            .arg(file_path)
            .arg(mime_type)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                error!("Failed to start OCR process '{}': {}", self.python_binary, e);
                return ExtractionOutcome::failed(
                    ExtractionErrorKind::SpawnFailed,
                    format!("failed to start '{}': {}", self.python_binary, e),
                );
            }
        };

        // kill_on_drop reaps the child when the timed-out future is dropped.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!("Failed to collect OCR process output: {}", e);
                return ExtractionOutcome::failed(
                    ExtractionErrorKind::SpawnFailed,
                    format!("failed to collect process output: {}", e),
                );
            }
            Err(_) => {
                warn!(
                    "OCR process timed out after {}s for {}",
                    self.timeout.as_secs(),
                    file_path.display()
                );
                return ExtractionOutcome::failed(
                    ExtractionErrorKind::Timeout,
                    format!("extraction timed out after {}s", self.timeout.as_secs()),
                );
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "OCR process exited with {:?}: {}",
                output.status.code(),
                stderr.trim()
            );
            let detail = if stderr.trim().is_empty() {
                format!("process exited with status {}", output.status)
            } else {
                stderr.trim().to_string()
            };
            return ExtractionOutcome::failed(ExtractionErrorKind::ExtractionFailed, detail);
        }

        let parsed: ExtractionWireResult = match serde_json::from_str(stdout.trim()) {
            Ok(parsed) => parsed,
            Err(e) => {
                // The process claimed success but broke the stdout contract;
                // keep the raw output so the violation can be diagnosed.
                error!("Failed to parse OCR output: {}", e);
                let mut raw = stdout.trim().to_string();
                if raw.len() > RAW_OUTPUT_RETAIN_BYTES {
                    let mut cut = RAW_OUTPUT_RETAIN_BYTES;
                    while !raw.is_char_boundary(cut) {
                        cut -= 1;
                    }
                    raw.truncate(cut);
                }
                return ExtractionOutcome::failed(
                    ExtractionErrorKind::MalformedOutput,
                    format!("unparseable extractor output ({}): {}", e, raw),
                );
            }
        };

        if !parsed.success {
            let detail = parsed
                .error
                .unwrap_or_else(|| "extraction script reported failure".to_string());
            return ExtractionOutcome::failed(ExtractionErrorKind::ExtractionFailed, detail);
        }

        info!(
            "OCR process extracted {} words from {}",
            parsed.word_count,
            file_path.display()
        );
        ExtractionOutcome::succeeded(parsed.text)
    }
}
