//! Task repository that keeps the whole collection under one store key.

use super::codec;
use crate::task::{
    domain::{Task, TaskId, TaskUpdate},
    ports::{KeyValueStore, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "todoApp_tasks";

/// Task repository over a [`KeyValueStore`].
///
/// Every operation reads the full collection, changes it and writes the
/// full collection back. An internal mutex serialises these cycles within
/// one process; separate processes sharing the same store are not
/// coordinated and must be kept to a single writer.
///
/// Only [`TaskRepository::get_all`] treats a transient read failure as an
/// empty list. Mutations fail with [`TaskRepositoryError::Read`] instead,
/// so a failed read is never followed by a write over the stored value.
/// Removing the last task removes the key.
#[derive(Debug)]
pub struct KeyValueTaskRepository<S> {
    store: S,
    key: String,
    cycle: Mutex<()>,
}

impl<S> KeyValueTaskRepository<S>
where
    S: KeyValueStore,
{
    /// Creates a repository using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Creates a repository storing the collection under `key`.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            cycle: Mutex::new(()),
        }
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn load_lenient(&self) -> TaskRepositoryResult<Vec<Task>> {
        match self.store.get_item(&self.key) {
            Ok(Some(raw)) => Ok(codec::decode_tasks(&raw)),
            Ok(None) => Ok(Vec::new()),
            Err(err) if err.is_access_denied() => Err(TaskRepositoryError::read(err)),
            Err(err) => {
                warn!(key = %self.key, error = %err, "task storage unreadable; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn load_for_update(&self) -> TaskRepositoryResult<Vec<Task>> {
        let raw = self
            .store
            .get_item(&self.key)
            .map_err(TaskRepositoryError::read)?;
        Ok(raw.as_deref().map_or_else(Vec::new, codec::decode_tasks))
    }

    fn save(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        if tasks.is_empty() {
            self.store
                .remove_item(&self.key)
                .map_err(TaskRepositoryError::write)?;
            debug!(key = %self.key, "removed empty task collection");
            return Ok(());
        }
        let raw = codec::encode_tasks(tasks).map_err(TaskRepositoryError::write)?;
        self.store
            .set_item(&self.key, &raw)
            .map_err(TaskRepositoryError::write)?;
        debug!(key = %self.key, count = tasks.len(), "persisted task collection");
        Ok(())
    }
}

#[async_trait]
impl<S> TaskRepository for KeyValueTaskRepository<S>
where
    S: KeyValueStore,
{
    async fn add(&self, task: Task) -> TaskRepositoryResult<Task> {
        let _cycle = self.cycle.lock().await;
        let mut tasks = self.load_for_update()?;
        tasks.push(task.clone());
        self.save(&tasks)?;
        Ok(task)
    }

    async fn update(&self, id: &TaskId, update: &TaskUpdate) -> TaskRepositoryResult<Task> {
        let _cycle = self.cycle.lock().await;
        let mut tasks = self.load_for_update()?;
        let slot = tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
        if update.is_empty() {
            return Ok(slot.clone());
        }
        let merged = slot.merged(update);
        *slot = merged.clone();
        self.save(&tasks)?;
        Ok(merged)
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let _cycle = self.cycle.lock().await;
        let mut tasks = self.load_for_update()?;
        let before = tasks.len();
        tasks.retain(|task| task.id() != id);
        if tasks.len() == before {
            return Err(TaskRepositoryError::NotFound(id.clone()));
        }
        self.save(&tasks)
    }

    async fn delete_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<usize> {
        let _cycle = self.cycle.lock().await;
        let mut tasks = self.load_for_update()?;
        let before = tasks.len();
        tasks.retain(|task| !ids.contains(task.id()));
        let removed = before.saturating_sub(tasks.len());
        if removed > 0 {
            self.save(&tasks)?;
        }
        Ok(removed)
    }

    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let _cycle = self.cycle.lock().await;
        self.load_lenient()
    }
}
