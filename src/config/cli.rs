use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::path::{Path, PathBuf};

/// Filesystem stand-in for object storage: `<base>/<bucket>/<key>`.
///
/// Buckets are plain directories and must exist before anything is written.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub async fn create_bucket(&self, bucket: &str) -> Result<()> {
        tokio::fs::create_dir_all(self.bucket_path(bucket)).await?;
        Ok(())
    }

    fn bucket_path(&self, bucket: &str) -> PathBuf {
        Path::new(&self.base_path).join(bucket)
    }
}

impl Storage for LocalStorage {
    async fn write_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
        let bucket_path = self.bucket_path(bucket);
        if !tokio::fs::try_exists(&bucket_path).await? {
            return Err(EtlError::StorageWriteError {
                key: key.to_string(),
                message: format!("bucket {} does not exist", bucket),
            });
        }

        let full_path = bucket_path.join(key);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}
