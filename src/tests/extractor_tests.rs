#[cfg(test)]
mod tests {
    use crate::extractor::{ExtractionErrorKind, PythonOcrExtractor, TextExtractor};
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Stub "interpreter" setup: the scripts are plain shell, run with
    /// /bin/sh standing in for the Python binary, which exercises the exact
    /// spawn/stdout/stderr/exit-code contract.
    fn write_stub(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("stub.sh");
        fs::write(&path, body).unwrap();
        path
    }

    fn write_input(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("contract.pdf");
        fs::write(&path, b"%PDF-1.4 fake").unwrap();
        path
    }

    fn extractor(script: &PathBuf, timeout: Duration) -> PythonOcrExtractor {
        PythonOcrExtractor::new(
            "/bin/sh".to_string(),
            script.to_string_lossy().to_string(),
            timeout,
        )
    }

    #[tokio::test]
    async fn test_successful_extraction() {
        let dir = TempDir::new().unwrap();
        let script = write_stub(
            &dir,
            r#"echo '{"success": true, "text": "hello legal world", "word_count": 3, "text_length": 17, "chunk_count": 1, "chunks": [{"index": 0, "content": "hello legal world", "length": 17}], "error": null}'"#,
        );
        let input = write_input(&dir);

        let outcome = extractor(&script, Duration::from_secs(5))
            .extract(&input, "application/pdf")
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.text, "hello legal world");
        assert!(outcome.failure.is_none());
        assert!(outcome.error_message().is_none());
    }

    #[tokio::test]
    async fn test_script_reported_failure() {
        let dir = TempDir::new().unwrap();
        let script = write_stub(
            &dir,
            r#"echo '{"success": false, "error": "Error extracting text from PDF: broken xref", "text": "", "text_length": 0, "word_count": 0, "chunk_count": 0, "chunks": []}'"#,
        );
        let input = write_input(&dir);

        let outcome = extractor(&script, Duration::from_secs(5))
            .extract(&input, "application/pdf")
            .await;

        assert!(!outcome.success);
        assert!(outcome.text.is_empty());
        let failure = outcome.failure.as_ref().unwrap();
        assert_eq!(failure.kind, ExtractionErrorKind::ExtractionFailed);
        assert!(failure.message.contains("broken xref"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_captures_stderr() {
        let dir = TempDir::new().unwrap();
        let script = write_stub(&dir, "echo 'tesseract not installed' >&2\nexit 3\n");
        let input = write_input(&dir);

        let outcome = extractor(&script, Duration::from_secs(5))
            .extract(&input, "image/png")
            .await;

        assert!(!outcome.success);
        let failure = outcome.failure.as_ref().unwrap();
        assert_eq!(failure.kind, ExtractionErrorKind::ExtractionFailed);
        assert!(failure.message.contains("tesseract not installed"));
    }

    #[tokio::test]
    async fn test_malformed_stdout_is_a_contract_violation() {
        let dir = TempDir::new().unwrap();
        let script = write_stub(&dir, "echo 'OCR COMPLETE: 42 words'\n");
        let input = write_input(&dir);

        let outcome = extractor(&script, Duration::from_secs(5))
            .extract(&input, "application/pdf")
            .await;

        assert!(!outcome.success);
        let failure = outcome.failure.as_ref().unwrap();
        assert_eq!(failure.kind, ExtractionErrorKind::MalformedOutput);
        // Raw output is retained for diagnosis.
        assert!(failure.message.contains("OCR COMPLETE: 42 words"));
    }

    #[tokio::test]
    async fn test_missing_input_file_fails_before_spawning() {
        let dir = TempDir::new().unwrap();
        let script = write_stub(&dir, "echo 'should never run'\n");

        let outcome = extractor(&script, Duration::from_secs(5))
            .extract(std::path::Path::new("/definitely/not/here.pdf"), "application/pdf")
            .await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.failure.as_ref().unwrap().kind,
            ExtractionErrorKind::FileNotFound
        );
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_spawn_failure() {
        let dir = TempDir::new().unwrap();
        let script = write_stub(&dir, "echo hi\n");
        let input = write_input(&dir);

        let extractor = PythonOcrExtractor::new(
            "/nonexistent/bin/python3".to_string(),
            script.to_string_lossy().to_string(),
            Duration::from_secs(5),
        );
        let outcome = extractor.extract(&input, "application/pdf").await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.failure.as_ref().unwrap().kind,
            ExtractionErrorKind::SpawnFailed
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_the_process() {
        let dir = TempDir::new().unwrap();
        let script = write_stub(&dir, "sleep 30\necho '{\"success\": true}'\n");
        let input = write_input(&dir);

        let outcome = extractor(&script, Duration::from_millis(250))
            .extract(&input, "application/pdf")
            .await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.failure.as_ref().unwrap().kind,
            ExtractionErrorKind::Timeout
        );
        assert!(outcome.failure.as_ref().unwrap().message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_error_message_includes_kind_tag() {
        let dir = TempDir::new().unwrap();
        let script = write_stub(&dir, "echo 'garbage'\n");
        let input = write_input(&dir);

        let outcome = extractor(&script, Duration::from_secs(5))
            .extract(&input, "application/pdf")
            .await;

        let message = outcome.error_message().unwrap();
        assert!(message.starts_with("malformed_output:"));
    }
}
