//! In-memory key-value store with an optional byte quota.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{KeyValueError, KeyValueResult, KeyValueStore};

/// Thread-safe in-memory key-value store.
///
/// Clones share the same underlying state, so a test can keep a handle to
/// inspect or seed what a repository persists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<InMemoryKeyValueState>>,
}

#[derive(Debug, Default)]
struct InMemoryKeyValueState {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store holding at most `quota` bytes of keys and
    /// values combined.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        let state = InMemoryKeyValueState {
            items: HashMap::new(),
            quota: Some(quota),
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> KeyValueError {
    KeyValueError::from(std::io::Error::other(err.to_string()))
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> KeyValueResult<Option<String>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> KeyValueResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if let Some(quota) = state.quota {
            let others: usize = state
                .items
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, stored)| existing.len().saturating_add(stored.len()))
                .sum();
            let required = others.saturating_add(key.len()).saturating_add(value.len());
            if required > quota {
                return Err(KeyValueError::QuotaExceeded { required, quota });
            }
        }
        state.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KeyValueResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.items.remove(key);
        Ok(())
    }
}
