use std::error::Error as StdError;

use chrono::{DateTime, Utc};
use snafu::prelude::*;

use crate::domain::entity::TimerMode;

/// A public port for announcing the end of a phase.
#[cfg_attr(test, mockall::automock)]
pub trait CuePort: Send + Sync + 'static {
    /// Play the cue for a finished session of `mode`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the cue could not be played.
    /// Callers treat it as cosmetic.
    fn play(&self, mode: TimerMode) -> Result<(), CueError>;
}

/// An error type of the cue operation.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum CueError {
    #[snafu(whatever, display("Could not play cue: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// A public port for reading wall-clock time.
pub trait Clock: Send + Sync + 'static {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;

    /// Current time as a [`DateTime`].
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.now_ms()).unwrap_or_default()
    }
}
