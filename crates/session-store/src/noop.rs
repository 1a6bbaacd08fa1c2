//! Storage backend that persists nothing.

use crate::{SessionStorage, StorageResult};

/// Accepts writes and forgets them; every read is a miss.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStorage;

impl SessionStorage for NoopStorage {
    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Ok(())
    }

    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn remove(&self, _key: &str) -> StorageResult<bool> {
        Ok(false)
    }
}
