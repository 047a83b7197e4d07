use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Which kind of phase the timer is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    /// Number of completed work sessions between two long breaks.
    pub const LONG_BREAK_CADENCE: u64 = 4;

    /// Get an initialized [`TimerMode`].
    pub fn initial() -> Self {
        Self::Work
    }

    /// Get the mode that follows a completed session of this mode, given the
    /// lifetime counter of completed work sessions after the completion.
    pub fn next(self, sessions_completed: u64) -> Self {
        match self {
            Self::Work if sessions_completed % Self::LONG_BREAK_CADENCE == 0 => Self::LongBreak,
            Self::Work => Self::ShortBreak,
            Self::ShortBreak | Self::LongBreak => Self::Work,
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Focus",
            Self::ShortBreak => "Short break",
            Self::LongBreak => "Long break",
        }
    }
}

impl Display for TimerMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Work => f.write_str("work"),
            Self::ShortBreak => f.write_str("shortBreak"),
            Self::LongBreak => f.write_str("longBreak"),
        }
    }
}

/// Whether the countdown currently advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

impl Display for TimerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running => f.write_str("running"),
            Self::Paused => f.write_str("paused"),
        }
    }
}
