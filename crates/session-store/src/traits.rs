//! Storage trait definitions.

use crate::StorageResult;

/// Trait for session storage backends.
pub trait SessionStorage: Send + Sync {
    /// Store a value under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Retrieve a value
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Remove a value. Returns whether a value was present; removing an
    /// absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<bool>;

    /// Check if a key exists
    fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
