use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use snafu::prelude::*;

use crate::domain::repository::store::{IoSnafu, StateStore, StoreError};

/// A [`StateStore`] keeping one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    /// Creates a new [`JsonFileStore`]. The directory is created on the first
    /// write.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl StateStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).context(IoSnafu {
                key,
                action: "read",
                path,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.directory).context(IoSnafu {
            key,
            action: "create directory",
            path: self.directory.as_path(),
        })?;

        // Write aside and rename so a crash never leaves half a document.
        let path = self.path(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).context(IoSnafu {
            key,
            action: "write",
            path: staging.as_path(),
        })?;
        fs::rename(&staging, &path).context(IoSnafu {
            key,
            action: "replace",
            path: path.as_path(),
        })?;

        tracing::trace!(key, path = %path.display(), "state saved");
        Ok(())
    }
}

/// A [`StateStore`] that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates a new, empty [`MemoryStore`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
