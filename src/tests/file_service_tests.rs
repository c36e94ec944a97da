#[cfg(test)]
mod tests {
    use crate::services::file_service::FileService;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_test_file_service() -> (FileService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let service = FileService::new(temp_dir.path().to_string_lossy().to_string());
        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_save_temp_file_writes_content() {
        let (service, _temp_dir) = create_test_file_service();

        let path = service
            .save_temp_file("contract.pdf", b"PDF content")
            .await
            .unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"PDF content");
    }

    #[tokio::test]
    async fn test_save_temp_file_keeps_stem_and_extension() {
        let (service, _temp_dir) = create_test_file_service();

        let path = service
            .save_temp_file("lease agreement.pdf", b"data")
            .await
            .unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("lease agreement-"));
        assert!(name.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_same_original_name_yields_distinct_paths() {
        let (service, _temp_dir) = create_test_file_service();

        let first = service.save_temp_file("scan.png", b"one").await.unwrap();
        let second = service.save_temp_file("scan.png", b"two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_save_temp_file_without_extension() {
        let (service, _temp_dir) = create_test_file_service();

        let path = service.save_temp_file("scan", b"data").await.unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("scan-"));
    }

    #[tokio::test]
    async fn test_delete_temp_file_removes_the_file() {
        let (service, _temp_dir) = create_test_file_service();

        let path = service.save_temp_file("doc.pdf", b"data").await.unwrap();
        assert!(path.exists());

        service.delete_temp_file(&path).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_delete_temp_file_is_idempotent() {
        let (service, _temp_dir) = create_test_file_service();

        let path = service.save_temp_file("doc.pdf", b"data").await.unwrap();
        service.delete_temp_file(&path).await;
        // Second delete of a missing file must not panic or log an error path.
        service.delete_temp_file(&path).await;
        service
            .delete_temp_file(Path::new("/never/existed.pdf"))
            .await;
    }

    #[tokio::test]
    async fn test_initialize_directory_structure_creates_temp_dir() {
        let base = TempDir::new().unwrap();
        let nested = base.path().join("staging").join("uploads");
        let service = FileService::new(nested.to_string_lossy().to_string());

        service.initialize_directory_structure().await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_read_file_roundtrip() {
        let (service, _temp_dir) = create_test_file_service();

        let path = service.save_temp_file("doc.pdf", b"roundtrip").await.unwrap();
        let data = service.read_file(&path).await.unwrap();
        assert_eq!(data, b"roundtrip");
    }

    #[test]
    fn test_content_hash_is_sha256_hex() {
        let hash = FileService::content_hash(b"hello");
        assert_eq!(
            hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_content_hash_differs_for_different_content() {
        assert_ne!(
            FileService::content_hash(b"alpha"),
            FileService::content_hash(b"beta")
        );
    }
}
