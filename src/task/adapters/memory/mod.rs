//! In-memory adapters for tests and ephemeral sessions.

mod key_value;

pub use key_value::InMemoryKeyValueStore;
