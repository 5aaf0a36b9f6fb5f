//! Filesystem-backed key-value store.
//!
//! Each key maps to one file inside a capability-scoped directory. Writes
//! land in a hidden temporary sibling first and are renamed over the target,
//! so a reader never observes a half-written value.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use tracing::warn;

use crate::task::ports::{KeyValueError, KeyValueResult, KeyValueStore};

/// Key-value store keeping one file per key in a directory.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
}

impl DirectoryKeyValueStore {
    /// Opens the directory at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::AccessDenied`] when the directory cannot be
    /// opened for permission reasons, or [`KeyValueError::Io`] otherwise.
    pub fn open(path: &Utf8Path) -> KeyValueResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(path, ambient_authority()))
            .map(Self::from_dir)
            .map_err(|err| map_io(path.as_str(), err))
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

/// Rejects keys that would escape the directory or collide with temporary
/// files.
fn checked_key(key: &str) -> KeyValueResult<&str> {
    let is_valid = !key.is_empty()
        && !key.starts_with('.')
        && !key.contains(['/', '\\'])
        && !key.chars().any(char::is_control);
    if is_valid {
        Ok(key)
    } else {
        Err(KeyValueError::InvalidKey(key.to_owned()))
    }
}

fn map_io(key: &str, err: std::io::Error) -> KeyValueError {
    if err.kind() == ErrorKind::PermissionDenied {
        KeyValueError::AccessDenied(key.to_owned())
    } else {
        KeyValueError::from(err)
    }
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn get_item(&self, key: &str) -> KeyValueResult<Option<String>> {
        let file = checked_key(key)?;
        match self.dir.read_to_string(file) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(map_io(key, err)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> KeyValueResult<()> {
        let file = checked_key(key)?;
        let staging = format!(".{file}.tmp");
        let result = self
            .dir
            .write(&staging, value)
            .and_then(|()| self.dir.rename(&staging, &self.dir, file));
        if let Err(err) = result {
            if let Err(cleanup) = self.dir.remove_file(&staging) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(key, error = %cleanup, "could not remove staging file");
                }
            }
            return Err(map_io(key, err));
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KeyValueResult<()> {
        let file = checked_key(key)?;
        match self.dir.remove_file(file) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(map_io(key, err)),
        }
    }
}
