use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::Error as IoError;
use std::path::PathBuf;
use std::sync::Arc;

use snafu::prelude::*;

/// An abstract key-value storage for raw JSON documents.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore: Send + Sync + 'static {
    /// Read the document stored under `key`. Returns `None` if nothing has
    /// been stored yet.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying storage fails.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the underlying storage fails.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The five independent slots of durable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Settings,
    Tasks,
    Notes,
    History,
    SessionsCompleted,
}

impl StoreKey {
    pub const ALL: [StoreKey; 5] = [
        Self::Settings,
        Self::Tasks,
        Self::Notes,
        Self::History,
        Self::SessionsCompleted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "lofi-focus.settings",
            Self::Tasks => "lofi-focus.tasks",
            Self::Notes => "lofi-focus.notes",
            Self::History => "lofi-focus.history",
            Self::SessionsCompleted => "lofi-focus.sessions-completed",
        }
    }
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// An error type of accessing a [`StateStore`].
#[derive(Debug, Snafu, Clone)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum StoreError {
    #[snafu(display("Could not {action} {} for key {key}", path.display()))]
    Io {
        key: String,
        action: &'static str,
        path: PathBuf,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
