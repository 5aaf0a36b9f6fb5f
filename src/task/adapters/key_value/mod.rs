//! Storage adapter persisting tasks as one serialised value in a
//! key-value store.

pub mod codec;
mod repository;

pub use codec::RecordShapeError;
pub use repository::{DEFAULT_STORAGE_KEY, KeyValueTaskRepository};
