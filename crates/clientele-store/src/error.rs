//! Error types for the storage layer.

/// Errors that can occur while reading or writing persisted entries.
///
/// The in-memory backend never produces these; they exist for backends
/// that touch the filesystem.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
