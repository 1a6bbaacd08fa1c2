//! Storage key constants.

/// Storage keys used by the session state machine
pub struct StorageKeys;

impl StorageKeys {
    /// Session token (raw string)
    pub const TOKEN: &'static str = "token";

    /// Authenticated user (JSON)
    pub const USER: &'static str = "user";
}
