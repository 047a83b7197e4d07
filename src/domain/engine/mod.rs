//! The Pomodoro focus-timer engine.
//!
//! [`PomodoroEngine`] is a synchronous, single-owner state machine. It never
//! sleeps and owns no timer of its own: a driver (see
//! [`worker`](crate::domain::worker)) calls [`PomodoroEngine::tick`] while the
//! engine is running. The remaining time is always recomputed from an absolute
//! end timestamp, so late or missed ticks never skew the countdown.

mod stats;
mod tasks;
mod timer;

pub use stats::{DayStats, WeekDayStats};
pub use timer::Completion;

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entity::{PomodoroSettings, SessionRecord, Task, TimerMode, TimerStatus};
use crate::domain::outbound::{Clock, CuePort};
use crate::domain::repository::{Persisted, StateStore, StoreKey};

/// Read-only view of the timer for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub mode: TimerMode,
    pub status: TimerStatus,
    pub time_left: u64,
    pub sessions_completed: u64,
    pub settings: PomodoroSettings,
}

/// Countdown progress. The end timestamp only exists while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Countdown {
    Idle,
    Running { end_at_ms: i64 },
    Paused,
}

impl Countdown {
    fn status(self) -> TimerStatus {
        match self {
            Self::Idle => TimerStatus::Idle,
            Self::Running { .. } => TimerStatus::Running,
            Self::Paused => TimerStatus::Paused,
        }
    }
}

/// Owner of the timer, its settings, the task list, notes and session history.
pub struct PomodoroEngine {
    clock: Arc<dyn Clock>,
    cue: Arc<dyn CuePort>,
    persisted: Persisted,
    settings: PomodoroSettings,
    tasks: Vec<Task>,
    notes: String,
    history: Vec<SessionRecord>,
    sessions_completed: u64,
    mode: TimerMode,
    countdown: Countdown,
    time_left: u64,
}

impl PomodoroEngine {
    /// Build the engine by loading each piece of durable state independently.
    /// Missing or malformed pieces fall back to their defaults.
    pub fn load(store: Arc<dyn StateStore>, clock: Arc<dyn Clock>, cue: Arc<dyn CuePort>) -> Self {
        let persisted = Persisted::new(store);
        let now = clock.now();

        let settings: PomodoroSettings = persisted.load(StoreKey::Settings, Default::default);
        let tasks = persisted.load(StoreKey::Tasks, Vec::new);
        let notes = persisted.load(StoreKey::Notes, String::new);
        let mut history: Vec<SessionRecord> = persisted.load(StoreKey::History, Vec::new);
        let sessions_completed = persisted.load(StoreKey::SessionsCompleted, || 0);

        let before = history.len();
        history.retain(|record| record.is_retained(now));
        if history.len() != before {
            tracing::debug!(purged = before - history.len(), "dropped expired session records");
        }

        let mode = TimerMode::initial();
        let time_left = settings.duration(mode).seconds();

        Self {
            clock,
            cue,
            persisted,
            settings,
            tasks,
            notes,
            history,
            sessions_completed,
            mode,
            countdown: Countdown::Idle,
            time_left,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn status(&self) -> TimerStatus {
        self.countdown.status()
    }

    /// Seconds left in the current phase as of the latest transition or tick.
    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    /// Lifetime number of completed work sessions.
    pub fn sessions_completed(&self) -> u64 {
        self.sessions_completed
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn history(&self) -> &[SessionRecord] {
        &self.history
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            status: self.status(),
            time_left: self.time_left,
            sessions_completed: self.sessions_completed,
            settings: self.settings,
        }
    }

    /// Empty the session history. The lifetime counter is left untouched.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persisted.save(StoreKey::History, &self.history);
    }
}
