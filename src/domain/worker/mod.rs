mod handle;
mod routine;

pub use handle::{EngineError, EngineEvent, EngineHandle};
pub use routine::WorkerConfig;

use crate::domain::engine::PomodoroEngine;

use handle::event_channel;
use routine::WorkerRoutine;

/// Move `engine` onto a background task and return a handle to drive it.
pub fn spawn(engine: PomodoroEngine, config: WorkerConfig) -> EngineHandle {
    let (requester, commands) = tokio::sync::mpsc::channel(16);
    let events = event_channel();
    WorkerRoutine::new(engine, commands, events.clone(), config).spawn();
    EngineHandle::new(requester, events)
}
