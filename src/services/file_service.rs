use anyhow::Result;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};
use uuid::Uuid;

/// Stages uploads on local disk while the extraction pipeline runs. Every
/// staged file is named uniquely per upload so concurrent requests can
/// never collide, and deletion tolerates already-missing files.
#[derive(Clone)]
pub struct FileService {
    temp_path: String,
}

impl FileService {
    pub fn new(temp_path: String) -> Self {
        Self { temp_path }
    }

    /// Ensure the staging directory exists before the first upload.
    pub async fn initialize_directory_structure(&self) -> Result<()> {
        let dir = Path::new(&self.temp_path);
        if let Err(e) = fs::create_dir_all(dir).await {
            error!("Failed to create temp directory {:?}: {}", dir, e);
            return Err(anyhow::anyhow!("Failed to create temp directory: {}", e));
        }
        Ok(())
    }

    pub fn temp_dir(&self) -> PathBuf {
        PathBuf::from(&self.temp_path)
    }

    /// Writes `data` to a fresh temp file named `<stem>-<uuid>.<ext>` and
    /// returns its path. The uuid suffix keeps batches and concurrent
    /// requests from sharing a path.
    pub async fn save_temp_file(&self, original_name: &str, data: &[u8]) -> Result<PathBuf> {
        let stem = Path::new(original_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("upload");
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let unique = Uuid::new_v4();
        let staged_name = if extension.is_empty() {
            format!("{}-{}", stem, unique)
        } else {
            format!("{}-{}.{}", stem, unique, extension)
        };

        let dir = self.temp_dir();
        fs::create_dir_all(&dir).await?;
        let file_path = dir.join(staged_name);
        fs::write(&file_path, data).await?;

        Ok(file_path)
    }

    /// Removes a staged file. Called on every pipeline exit path, so a file
    /// that is already gone is treated as success.
    pub async fn delete_temp_file(&self, file_path: &Path) {
        match fs::remove_file(file_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!("Failed to delete temp file {:?}: {}", file_path, e);
            }
        }
    }

    pub async fn read_file(&self, file_path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(file_path).await?;
        Ok(data)
    }

    /// SHA-256 of the uploaded content, recorded for audit.
    pub fn content_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }
}
