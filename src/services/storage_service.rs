use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config::S3Config;

#[cfg(feature = "s3")]
use aws_credential_types::Credentials;
#[cfg(feature = "s3")]
use aws_sdk_s3::{primitives::ByteStream, Client};
#[cfg(feature = "s3")]
use aws_types::region::Region as AwsRegion;

#[cfg(not(feature = "s3"))]
use anyhow::anyhow;

/// Mirrors successfully processed originals to object storage. The mirror
/// is a best-effort step: callers log a failure and leave `storage_url`
/// null, they never abort the pipeline for it.
#[derive(Debug, Clone)]
pub struct StorageService {
    #[cfg(feature = "s3")]
    client: Client,
    config: S3Config,
}

impl StorageService {
    pub async fn new(config: S3Config) -> Result<Self> {
        #[cfg(not(feature = "s3"))]
        {
            let _ = &config;
            return Err(anyhow!(
                "S3 support not compiled in. Enable the 's3' feature to mirror uploads."
            ));
        }

        #[cfg(feature = "s3")]
        {
            let credentials = Credentials::new(
                &config.access_key_id,
                &config.secret_access_key,
                None,
                None,
                "lexocr-storage",
            );

            let mut builder = aws_sdk_s3::config::Builder::new()
                .region(AwsRegion::new(config.region.clone()))
                .credentials_provider(credentials)
                .behavior_version_latest();

            // Custom endpoint for S3-compatible services (MinIO etc.)
            if let Some(endpoint_url) = &config.endpoint_url {
                builder = builder.endpoint_url(endpoint_url).force_path_style(true);
                info!("Using custom S3 endpoint: {}", endpoint_url);
            }

            let client = Client::from_conf(builder.build());
            Ok(Self { client, config })
        }
    }

    /// Uploads the original file under `<prefix>/<file_id>/<name>` and
    /// returns a durable URL for it.
    pub async fn upload_original(
        &self,
        local_path: &Path,
        file_id: uuid::Uuid,
        original_name: &str,
        mime_type: &str,
    ) -> Result<String> {
        #[cfg(not(feature = "s3"))]
        {
            let _ = (local_path, file_id, original_name, mime_type);
            return Err(anyhow!("S3 support not compiled in"));
        }

        #[cfg(feature = "s3")]
        {
            let key = format!("{}/{}/{}", self.config.key_prefix, file_id, original_name);
            let body = ByteStream::from_path(local_path).await?;

            self.client
                .put_object()
                .bucket(&self.config.bucket_name)
                .key(&key)
                .content_type(mime_type)
                .body(body)
                .send()
                .await?;

            info!(
                "Mirrored {} to s3://{}/{}",
                local_path.display(),
                self.config.bucket_name,
                key
            );
            Ok(self.object_url(&key))
        }
    }

    #[cfg(feature = "s3")]
    fn object_url(&self, key: &str) -> String {
        match &self.config.endpoint_url {
            Some(endpoint) => format!(
                "{}/{}/{}",
                endpoint.trim_end_matches('/'),
                self.config.bucket_name,
                key
            ),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.config.bucket_name, self.config.region, key
            ),
        }
    }
}
