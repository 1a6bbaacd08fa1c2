//! Key-value persistence for client session data.
//!
//! The session state machine only needs `get`/`set`/`remove` on string keys.
//! This crate provides that contract plus three backends:
//! - **memory**: process-local map, used in tests and embedded contexts
//! - **file**: a JSON object on disk, surviving process restarts
//! - **noop**: stores nothing, for contexts without persistence

mod file;
mod keys;
mod memory;
mod noop;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use noop::NoopStorage;
pub use traits::SessionStorage;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific failure
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Persisted data could not be decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Encoding(err.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
