use thiserror::Error;

/// Errors that can occur during file storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),
    /// The file name is empty or would escape the storage directory.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    /// The file exceeds the configured size limit.
    #[error("file exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
