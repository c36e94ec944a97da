#[cfg(test)]
mod tests {
    use crate::chunking::{chunk_text, TextChunk};
    use crate::ingestion::processor::{BatchSummary, ProcessedFile};
    use crate::models::{
        BatchUploadResponse, FileUploadResult, HistoryResponse, ProcessingStatus, TextStats,
        BATCH_UPLOAD_CHUNK_PREVIEW, SINGLE_UPLOAD_CHUNK_PREVIEW,
    };
    use uuid::Uuid;

    fn make_chunks(count: usize) -> Vec<TextChunk> {
        (0..count)
            .map(|i| TextChunk {
                index: i as i32,
                content: format!("chunk {}", i),
                start_word_offset: (i * 450) as i32,
                word_count: 500,
                char_length: 7,
            })
            .collect()
    }

    fn make_processed(chunks: usize, success: bool) -> ProcessedFile {
        ProcessedFile {
            file_id: Some(Uuid::new_v4()),
            original_name: "lease.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            file_size: 2048,
            storage_url: None,
            extracted_text: "some text".to_string(),
            stats: TextStats {
                word_count: 2,
                character_count: 9,
                chunk_count: chunks as i32,
            },
            chunks: make_chunks(chunks),
            success,
            failure_kind: None,
            error: None,
        }
    }

    #[test]
    fn test_text_stats_derive() {
        let text = "one two three four five";
        let chunks = chunk_text(text, 3, 1).unwrap();
        let stats = TextStats::derive(text, &chunks);

        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.character_count, 23);
        assert_eq!(stats.chunk_count, chunks.len() as i32);
    }

    #[test]
    fn test_text_stats_default_is_zeroed() {
        let stats = TextStats::default();
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.character_count, 0);
        assert_eq!(stats.chunk_count, 0);
    }

    #[test]
    fn test_processing_status_string_roundtrip() {
        for status in [
            ProcessingStatus::Pending,
            ProcessingStatus::Processing,
            ProcessingStatus::Completed,
            ProcessingStatus::Failed,
        ] {
            let parsed: ProcessingStatus = status.to_string().try_into().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_processing_status_rejects_unknown_values() {
        let result: Result<ProcessingStatus, _> = "archived".to_string().try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_single_upload_preview_truncates_chunks() {
        let processed = make_processed(12, true);
        let result = FileUploadResult::from_processed(processed, SINGLE_UPLOAD_CHUNK_PREVIEW);

        assert_eq!(result.chunks.len(), 5);
        assert_eq!(result.chunks[0].index, 0);
        assert_eq!(result.chunks[4].index, 4);
        // The stats still describe the full chunk list, not the preview.
        assert_eq!(result.text_stats.chunk_count, 12);
    }

    #[test]
    fn test_preview_shorter_than_limit_is_untouched() {
        let processed = make_processed(2, true);
        let result = FileUploadResult::from_processed(processed, SINGLE_UPLOAD_CHUNK_PREVIEW);
        assert_eq!(result.chunks.len(), 2);
    }

    #[test]
    fn test_batch_response_counts_and_order() {
        let summary = BatchSummary {
            total: 3,
            succeeded: 2,
            failed: 1,
            results: vec![
                make_processed(1, true),
                ProcessedFile {
                    success: false,
                    error: Some("Unsupported file type: text/plain".to_string()),
                    file_id: None,
                    ..make_processed(0, false)
                },
                make_processed(1, true),
            ],
        };

        let response = BatchUploadResponse::from(summary);
        assert!(response.success);
        assert_eq!(response.message, "Processed 2/3 files successfully");
        assert_eq!(response.data.total_files, 3);
        assert_eq!(response.data.successful_files, 2);
        assert_eq!(response.data.failed_files, 1);
        assert_eq!(response.data.results.len(), 3);
        assert!(response.data.results[0].success);
        assert!(!response.data.results[1].success);
        assert!(response.data.results[2].success);
    }

    #[test]
    fn test_batch_response_with_zero_successes_is_not_successful() {
        let summary = BatchSummary {
            total: 1,
            succeeded: 0,
            failed: 1,
            results: vec![make_processed(0, false)],
        };

        let response = BatchUploadResponse::from(summary);
        assert!(!response.success);
        assert_eq!(response.data.results[0].chunks.len(), 0);
    }

    #[test]
    fn test_batch_preview_limit_is_three() {
        let summary = BatchSummary {
            total: 1,
            succeeded: 1,
            failed: 0,
            results: vec![make_processed(7, true)],
        };

        let response = BatchUploadResponse::from(summary);
        assert_eq!(
            response.data.results[0].chunks.len(),
            BATCH_UPLOAD_CHUNK_PREVIEW
        );
    }

    #[test]
    fn test_history_pagination_pages() {
        let response = HistoryResponse::new(Vec::new(), 1, 10, 25);
        assert_eq!(response.pagination.pages, 3);
        assert_eq!(response.pagination.total, 25);

        let exact = HistoryResponse::new(Vec::new(), 2, 10, 30);
        assert_eq!(exact.pagination.pages, 3);

        let empty = HistoryResponse::new(Vec::new(), 1, 10, 0);
        assert_eq!(empty.pagination.pages, 0);
    }

    #[test]
    fn test_file_upload_result_serializes_expected_fields() {
        let result =
            FileUploadResult::from_processed(make_processed(1, true), SINGLE_UPLOAD_CHUNK_PREVIEW);
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("file_id").is_some());
        assert_eq!(json["filename"], "lease.pdf");
        assert_eq!(json["success"], true);
        assert_eq!(json["text_stats"]["chunk_count"], 1);
        assert!(json["error"].is_null());
    }
}
