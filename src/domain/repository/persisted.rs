use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::repository::store::{StateStore, StoreKey};
use crate::tracing_report;

/// Typed access to a [`StateStore`]. Reading never fails: anything missing or
/// unreadable falls back to the caller's default. Writing is best-effort.
#[derive(Clone)]
pub struct Persisted {
    store: Arc<dyn StateStore>,
}

impl Persisted {
    /// Creates a new [`Persisted`].
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Load and decode the value stored under `key`, or produce the default.
    pub fn load<T, F>(&self, key: StoreKey, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let raw = match self.store.read(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(%key, "nothing stored, using default");
                return default();
            }
            Err(err) => {
                tracing_report!(err, "could not read stored state, using default");
                return default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%key, %err, "stored state is malformed, using default");
                default()
            }
        }
    }

    /// Encode and store `value` under `key`. Failures are logged and dropped.
    pub fn save<T>(&self, key: StoreKey, value: &T)
    where
        T: Serialize + ?Sized,
    {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(%key, %err, "could not encode state");
                return;
            }
        };

        if let Err(err) = self.store.write(key.as_str(), &raw) {
            tracing_report!(err, "could not save state");
        }
    }
}
