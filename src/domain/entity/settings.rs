use serde::{Deserialize, Serialize};

use crate::domain::entity::{PhaseDuration, TimerMode};

/// Configured duration of every [`TimerMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Durations {
    pub work: PhaseDuration,
    pub short_break: PhaseDuration,
    pub long_break: PhaseDuration,
}

impl Durations {
    /// Get the duration corresponding to mode.
    pub fn get(&self, mode: TimerMode) -> PhaseDuration {
        match mode {
            TimerMode::Work => self.work,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }

    /// Replace the duration corresponding to mode.
    pub fn set(&mut self, mode: TimerMode, duration: PhaseDuration) {
        match mode {
            TimerMode::Work => self.work = duration,
            TimerMode::ShortBreak => self.short_break = duration,
            TimerMode::LongBreak => self.long_break = duration,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: PhaseDuration::clamped(25 * 60),
            short_break: PhaseDuration::clamped(5 * 60),
            long_break: PhaseDuration::clamped(15 * 60),
        }
    }
}

/// Durable timer settings.
///
/// `auto_start_breaks` and `auto_start_work` are stored and round-tripped but
/// the engine never starts a phase on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    pub durations: Durations,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_work: bool,
}

impl PomodoroSettings {
    /// Get the configured duration of mode.
    pub fn duration(&self, mode: TimerMode) -> PhaseDuration {
        self.durations.get(mode)
    }
}
