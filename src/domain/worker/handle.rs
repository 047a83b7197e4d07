use snafu::prelude::*;
use tokio::sync::broadcast::{self, Receiver as BroadcastReceiver, Sender as BroadcastSender};
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as OneshotSender};

use crate::domain::engine::{Completion, DayStats, EngineSnapshot, WeekDayStats};
use crate::domain::entity::{RecordId, SessionRecord, Task, TimerMode};

/// Actions that a [`WorkerRoutine`] runs.
///
/// [`WorkerRoutine`]: crate::domain::worker::routine::WorkerRoutine
#[derive(Debug)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    Skip,
    UpdateDuration { mode: TimerMode, minutes: i64 },
    AddTask { text: String },
    ToggleTask { id: RecordId },
    DeleteTask { id: RecordId },
    ClearCompletedTasks,
    UpdateNotes { text: String },
    ClearHistory,
    Snapshot { responder: OneshotSender<EngineSnapshot> },
    Tasks { responder: OneshotSender<Vec<Task>> },
    Notes { responder: OneshotSender<String> },
    History { responder: OneshotSender<Vec<SessionRecord>> },
    TodayStats { responder: OneshotSender<DayStats> },
    WeekStats { responder: OneshotSender<Vec<WeekDayStats>> },
    Stop { responder: OneshotSender<()> },
}

/// Things the worker reports without being asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The whole-second countdown moved.
    Tick { time_left: u64 },
    /// A session ended, by countdown or by an explicit command.
    Completed(Completion),
}

/// Handle that controls a [`WorkerRoutine`].
///
/// [`WorkerRoutine`]: crate::domain::worker::routine::WorkerRoutine
#[derive(Debug, Clone)]
pub struct EngineHandle {
    requester: Sender<Command>,
    events: BroadcastSender<EngineEvent>,
}

impl EngineHandle {
    /// Creates a new [`EngineHandle`].
    pub fn new(requester: Sender<Command>, events: BroadcastSender<EngineEvent>) -> Self {
        Self { requester, events }
    }

    /// Listen to [`EngineEvent`]s emitted from now on.
    pub fn subscribe(&self) -> BroadcastReceiver<EngineEvent> {
        self.events.subscribe()
    }

    pub async fn start(&self) -> Result<(), EngineError> {
        self.send(Command::Start).await
    }

    pub async fn pause(&self) -> Result<(), EngineError> {
        self.send(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<(), EngineError> {
        self.send(Command::Resume).await
    }

    pub async fn reset(&self) -> Result<(), EngineError> {
        self.send(Command::Reset).await
    }

    pub async fn skip(&self) -> Result<(), EngineError> {
        self.send(Command::Skip).await
    }

    pub async fn update_duration(&self, mode: TimerMode, minutes: i64) -> Result<(), EngineError> {
        self.send(Command::UpdateDuration { mode, minutes }).await
    }

    pub async fn add_task(&self, text: String) -> Result<(), EngineError> {
        self.send(Command::AddTask { text }).await
    }

    pub async fn toggle_task(&self, id: RecordId) -> Result<(), EngineError> {
        self.send(Command::ToggleTask { id }).await
    }

    pub async fn delete_task(&self, id: RecordId) -> Result<(), EngineError> {
        self.send(Command::DeleteTask { id }).await
    }

    pub async fn clear_completed_tasks(&self) -> Result<(), EngineError> {
        self.send(Command::ClearCompletedTasks).await
    }

    pub async fn update_notes(&self, text: String) -> Result<(), EngineError> {
        self.send(Command::UpdateNotes { text }).await
    }

    pub async fn clear_history(&self) -> Result<(), EngineError> {
        self.send(Command::ClearHistory).await
    }

    pub async fn snapshot(&self) -> Result<EngineSnapshot, EngineError> {
        self.ask(|responder| Command::Snapshot { responder }).await
    }

    pub async fn tasks(&self) -> Result<Vec<Task>, EngineError> {
        self.ask(|responder| Command::Tasks { responder }).await
    }

    pub async fn notes(&self) -> Result<String, EngineError> {
        self.ask(|responder| Command::Notes { responder }).await
    }

    pub async fn history(&self) -> Result<Vec<SessionRecord>, EngineError> {
        self.ask(|responder| Command::History { responder }).await
    }

    pub async fn today_stats(&self) -> Result<DayStats, EngineError> {
        self.ask(|responder| Command::TodayStats { responder }).await
    }

    pub async fn week_stats(&self) -> Result<Vec<WeekDayStats>, EngineError> {
        self.ask(|responder| Command::WeekStats { responder }).await
    }

    /// Stop the background worker and wait until it has quit.
    pub async fn stop(&self) -> Result<(), EngineError> {
        self.ask(|responder| Command::Stop { responder }).await
    }

    async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.requester
            .send(command)
            .await
            .map_err(|_| ClosedSnafu.build())
    }

    async fn ask<T, F>(&self, command: F) -> Result<T, EngineError>
    where
        F: FnOnce(OneshotSender<T>) -> Command,
    {
        let (responder, receiver) = oneshot::channel();
        self.send(command(responder)).await?;
        receiver.await.map_err(|_| ClosedSnafu.build())
    }
}

/// Create the event channel shared by a worker and its handles.
pub fn event_channel() -> BroadcastSender<EngineEvent> {
    let (events, _) = broadcast::channel(256);
    events
}

/// An error for talking to a worker that is no longer running.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[snafu(display("The timer engine is not running"))]
    Closed,
}
