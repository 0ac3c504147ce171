use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

use super::error::StorageError;
use super::traits::{BoxReader, FileStore, StoredFile};
use crate::config::StorageConfig;

/// Filesystem-backed flat file store.
///
/// Files live directly under `base_path`. Writes are staged in
/// `{base_path}/.tmp` and renamed into place, so readers never observe a
/// partially written file and a failed copy leaves the previous file intact.
pub struct FilesystemFileStore {
    base_path: PathBuf,
    max_size: u64,
    buffer_size: usize,
}

impl FilesystemFileStore {
    /// Create a new filesystem store, creating its directories if needed.
    pub async fn new(
        base_path: PathBuf,
        max_size: u64,
        buffer_size: usize,
    ) -> Result<Self, StorageError> {
        let store = Self {
            base_path,
            max_size,
            buffer_size: buffer_size.max(1),
        };
        store.ensure_dirs().await?;
        Ok(store)
    }

    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::new(
            config.avatars_dir.clone(),
            config.max_avatar_size,
            config.copy_buffer_size,
        )
        .await
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.base_path.join(".tmp")).await?;
        Ok(())
    }

    /// Resolve a flat file name to its path under the store root.
    fn file_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.starts_with('.')
            || name.contains(['/', '\\', '\0']);
        if invalid {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.base_path.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    async fn copy_to_temp(
        &self,
        reader: &mut BoxReader,
        temp_path: &Path,
    ) -> Result<u64, StorageError> {
        let mut temp_file = fs::File::create(temp_path).await?;
        let mut buf = vec![0u8; self.buffer_size];
        let mut total_bytes: u64 = 0;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_size {
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_size,
                });
            }

            temp_file.write_all(&buf[..n]).await?;
        }

        temp_file.flush().await?;
        temp_file.sync_all().await?;
        Ok(total_bytes)
    }
}

#[async_trait]
impl FileStore for FilesystemFileStore {
    async fn put_stream(
        &self,
        name: &str,
        mut reader: BoxReader,
    ) -> Result<StoredFile, StorageError> {
        let file_path = self.file_path(name)?;

        // The directory may have been removed since start-up.
        self.ensure_dirs().await?;

        let temp_path = self.temp_path();
        let size = match self.copy_to_temp(&mut reader, &temp_path).await {
            Ok(size) => size,
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&temp_path, &file_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(path = %file_path.display(), size, "File stored");

        Ok(StoredFile {
            path: file_path,
            size,
        })
    }

    async fn get_stream(&self, name: &str) -> Result<BoxReader, StorageError> {
        let file_path = self.file_path(name)?;
        match fs::File::open(&file_path).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        let file_path = self.file_path(name)?;
        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
