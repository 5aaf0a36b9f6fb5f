//! Port for the flat key-value store that backs task persistence.

use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type KeyValueResult<T> = Result<T, KeyValueError>;

/// String-keyed store of string values.
///
/// Each `set_item` call replaces the stored value atomically: a reader sees
/// either the previous value or the new one, never a mix.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::AccessDenied`] when the store refuses
    /// access, or another variant for transient failures.
    fn get_item(&self, key: &str) -> KeyValueResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::QuotaExceeded`] when the value does not fit,
    /// or another variant when the write fails. The previous value is left
    /// intact on failure.
    fn set_item(&self, key: &str, value: &str) -> KeyValueResult<()>;

    /// Removes the value stored under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyValueError`] when the removal fails.
    fn remove_item(&self, key: &str) -> KeyValueResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueError {
    /// The store denied access to the key.
    #[error("access denied for key '{0}'")]
    AccessDenied(String),

    /// Writing the value would exceed the store's capacity.
    #[error("storage quota exceeded: {required} bytes required, {quota} available")]
    QuotaExceeded {
        /// Total bytes the store would hold after the write.
        required: usize,
        /// Configured capacity in bytes.
        quota: usize,
    },

    /// The key cannot be used with this store.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("storage i/o error: {0}")]
    Io(Arc<std::io::Error>),
}

impl KeyValueError {
    /// Returns `true` when the failure signals an access or security
    /// condition rather than a transient fault.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied(_))
    }
}

impl From<std::io::Error> for KeyValueError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
