use std::path::PathBuf;

use serde::Deserialize;
use tokio::time::Duration;

use crate::domain::entity::notification::TryNewCueMessageError;
use crate::domain::entity::{CueMessage, TimerMode};
use crate::domain::worker::WorkerConfig;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub timer: TimerSection,
    #[serde(default)]
    pub cue: CueSection,
    #[serde(default)]
    pub notification: NotificationSection,
    #[serde(default)]
    pub storage: StorageSection,
}

impl Configuration {
    /// Get the cue message announcing the end of `mode`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the configured summary is blank.
    pub fn cue_message(&self, mode: TimerMode) -> Result<CueMessage, TryNewCueMessageError> {
        let section = match mode {
            TimerMode::Work => &self.notification.work,
            TimerMode::ShortBreak => &self.notification.short_break,
            TimerMode::LongBreak => &self.notification.long_break,
        };
        CueMessage::try_new(section.summary.clone(), section.body.clone())
    }

    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            tick_interval: Duration::from_millis(
                self.timer.tick_interval_ms.max(TimerSection::MIN_TICK_INTERVAL_MS),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimerSection {
    pub tick_interval_ms: u64,
}

impl TimerSection {
    pub const MIN_TICK_INTERVAL_MS: u64 = 10;
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CueSection {
    #[serde(default)]
    pub backend: CueBackend,
}

/// How the end of a phase is announced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueBackend {
    #[default]
    Desktop,
    Bell,
    Silent,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationSection {
    pub work: MessageContent,
    pub short_break: MessageContent,
    pub long_break: MessageContent,
}

impl Default for NotificationSection {
    fn default() -> Self {
        let message = |summary: &str, body: &str| MessageContent {
            summary: summary.to_owned(),
            body: Some(body.to_owned()),
        };
        Self {
            work: message("Focus session complete", "Nice work. Time for a break."),
            short_break: message("Break is over", "Back to it."),
            long_break: message("Long break is over", "Ready for another round?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageContent {
    pub summary: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorageSection {
    /// Where the state files live. Defaults to the XDG data directory.
    pub directory: Option<PathBuf>,
}
