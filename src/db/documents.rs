use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::chunking::TextChunk;
use crate::models::{ChunkPage, DocumentSummary, ProcessedDocument, ProcessingStatus};

const DOCUMENT_FIELDS: &str = "id, user_id, filename, original_filename, mime_type, file_size, \
     file_hash, storage_url, extracted_text, word_count, character_count, chunk_count, \
     status, error_message, extensions, created_at, updated_at";

const SUMMARY_FIELDS: &str = "id, original_filename, mime_type, file_size, status, \
     word_count, character_count, chunk_count, created_at";

fn map_row_to_document(row: &sqlx::postgres::PgRow) -> ProcessedDocument {
    ProcessedDocument {
        id: row.get("id"),
        user_id: row.get("user_id"),
        filename: row.get("filename"),
        original_filename: row.get("original_filename"),
        mime_type: row.get("mime_type"),
        file_size: row.get("file_size"),
        file_hash: row.get("file_hash"),
        storage_url: row.get("storage_url"),
        extracted_text: row.get("extracted_text"),
        word_count: row.get("word_count"),
        character_count: row.get("character_count"),
        chunk_count: row.get("chunk_count"),
        status: row
            .get::<String, _>("status")
            .try_into()
            .unwrap_or(ProcessingStatus::Failed),
        error_message: row.get("error_message"),
        extensions: row.get("extensions"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_row_to_chunk(row: &sqlx::postgres::PgRow) -> TextChunk {
    TextChunk {
        index: row.get("chunk_index"),
        content: row.get("content"),
        start_word_offset: row.get("start_word_offset"),
        word_count: row.get("word_count"),
        char_length: row.get("char_length"),
    }
}

fn map_row_to_summary(row: &sqlx::postgres::PgRow) -> DocumentSummary {
    DocumentSummary {
        id: row.get("id"),
        original_filename: row.get("original_filename"),
        mime_type: row.get("mime_type"),
        file_size: row.get("file_size"),
        status: row
            .get::<String, _>("status")
            .try_into()
            .unwrap_or(ProcessingStatus::Failed),
        word_count: row.get("word_count"),
        character_count: row.get("character_count"),
        chunk_count: row.get("chunk_count"),
        created_at: row.get("created_at"),
    }
}

/// Offset of a 1-indexed page. Pages below 1 are clamped to the first page.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1) * limit.max(0)
}

/// Whether more items remain past the returned slice.
pub fn slice_has_more(offset: i64, returned: usize, total: i64) -> bool {
    offset + (returned as i64) < total
}

impl Database {
    /// Inserts a document and its chunks in one transaction. This is the
    /// only write path for a document row; failed extraction outcomes are
    /// stored the same way as successes, just with an empty chunk list.
    pub async fn create_document(
        &self,
        document: &ProcessedDocument,
        chunks: &[TextChunk],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO documents (id, user_id, filename, original_filename, mime_type,
                file_size, file_hash, storage_url, extracted_text, word_count,
                character_count, chunk_count, status, error_message, extensions,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(document.id)
        .bind(document.user_id)
        .bind(&document.filename)
        .bind(&document.original_filename)
        .bind(&document.mime_type)
        .bind(document.file_size)
        .bind(&document.file_hash)
        .bind(&document.storage_url)
        .bind(&document.extracted_text)
        .bind(document.word_count)
        .bind(document.character_count)
        .bind(document.chunk_count)
        .bind(document.status.to_string())
        .bind(&document.error_message)
        .bind(&document.extensions)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&mut *tx)
        .await?;

        for chunk in chunks {
            sqlx::query(
                r#"
                INSERT INTO document_chunks (document_id, chunk_index, content,
                    start_word_offset, word_count, char_length)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(document.id)
            .bind(chunk.index)
            .bind(&chunk.content)
            .bind(chunk.start_word_offset)
            .bind(chunk.word_count)
            .bind(chunk.char_length)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Owner-scoped lookup. A document owned by another account is
    /// indistinguishable from one that does not exist.
    pub async fn get_document_by_id(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ProcessedDocument>> {
        let query_str = format!(
            "SELECT {} FROM documents WHERE id = $1 AND user_id = $2",
            DOCUMENT_FIELDS
        );

        let row = sqlx::query(&query_str)
            .bind(document_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| map_row_to_document(&r)))
    }

    /// All chunks for a document, in stored order.
    pub async fn get_document_chunks(&self, document_id: Uuid) -> Result<Vec<TextChunk>> {
        let rows = sqlx::query(
            r#"
            SELECT chunk_index, content, start_word_offset, word_count, char_length
            FROM document_chunks
            WHERE document_id = $1
            ORDER BY chunk_index
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_chunk).collect())
    }

    /// One 1-indexed page of a document's chunks, together with the owning
    /// record. Out-of-range pages yield an empty slice with
    /// `has_more = false`, never an error.
    pub async fn get_document_chunks_page(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<Option<(ProcessedDocument, ChunkPage)>> {
        let document = match self.get_document_by_id(document_id, user_id).await? {
            Some(document) => document,
            None => return Ok(None),
        };

        let offset = page_offset(page, page_size);
        let rows = sqlx::query(
            r#"
            SELECT chunk_index, content, start_word_offset, word_count, char_length
            FROM document_chunks
            WHERE document_id = $1
            ORDER BY chunk_index
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(document_id)
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = document.chunk_count as i64;
        let chunks: Vec<TextChunk> = rows.iter().map(map_row_to_chunk).collect();
        let has_more = slice_has_more(offset, chunks.len(), total);

        Ok(Some((
            document,
            ChunkPage {
                chunks,
                total_chunks: total,
                has_more,
            },
        )))
    }

    /// Newest-first metadata listing for one owner; text and chunks are
    /// deliberately excluded.
    pub async fn list_documents_by_owner(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<DocumentSummary>> {
        let query_str = format!(
            r#"
            SELECT {}
            FROM documents
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            SUMMARY_FIELDS
        );

        let rows = sqlx::query(&query_str)
            .bind(user_id)
            .bind(page_size)
            .bind(page_offset(page, page_size))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_row_to_summary).collect())
    }

    pub async fn count_documents_by_owner(&self, user_id: Uuid) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM documents WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }

    /// Merges an opaque downstream payload into the document's extension
    /// map under `feature`. Pipeline-owned fields are never touched.
    pub async fn update_document_extensions(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        feature: &str,
        payload: serde_json::Value,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET extensions = COALESCE(extensions, '{}'::jsonb) || jsonb_build_object($3::text, $4::jsonb),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(document_id)
        .bind(user_id)
        .bind(feature)
        .bind(payload)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
