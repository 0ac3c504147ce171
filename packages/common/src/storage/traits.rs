use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Location and size of a file after it has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Full path of the file on the server.
    pub path: PathBuf,
    /// Number of bytes written.
    pub size: u64,
}

/// Flat, name-addressed file storage.
///
/// Names are single path components; implementations reject anything that
/// could resolve outside their storage root.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write bytes under `name`, replacing any existing file.
    async fn put(&self, name: &str, data: &[u8]) -> Result<StoredFile, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(name, reader).await
    }

    /// Copy an async reader into the file `name`, replacing any existing file.
    async fn put_stream(&self, name: &str, reader: BoxReader) -> Result<StoredFile, StorageError>;

    /// Open the file as a streaming async reader.
    async fn get_stream(&self, name: &str) -> Result<BoxReader, StorageError>;

    /// Delete a file.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, name: &str) -> Result<bool, StorageError>;
}
