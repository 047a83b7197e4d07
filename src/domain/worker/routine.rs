use tokio::sync::broadcast::Sender as BroadcastSender;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, Interval, MissedTickBehavior};

use crate::domain::engine::{Completion, PomodoroEngine};
use crate::domain::entity::TimerStatus;
use crate::domain::worker::handle::{Command, EngineEvent};

/// A type that stores configurations required by [`WorkerRoutine`]
/// initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    /// How often the countdown is refreshed while running. Only affects how
    /// smooth the display is, never the accuracy.
    pub tick_interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(250),
        }
    }
}

/// A type responsible for driving a [`PomodoroEngine`] on background,
/// receiving [`Command`]s from [`EngineHandle`].
///
/// At most one tick poller exists at any time, and only while the engine is
/// running.
///
/// [`EngineHandle`]: crate::domain::worker::EngineHandle
pub struct WorkerRoutine {
    engine: PomodoroEngine,
    commands: Receiver<Command>,
    events: BroadcastSender<EngineEvent>,
    config: WorkerConfig,
    ticker: Option<Interval>,
}

impl WorkerRoutine {
    pub fn new(
        engine: PomodoroEngine,
        commands: Receiver<Command>,
        events: BroadcastSender<EngineEvent>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            engine,
            commands,
            events,
            config,
            ticker: None,
        }
    }

    /// Spawn a running [`WorkerRoutine`] on background.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut worker = self;
            worker.run().await;
        })
    }

    /// Main part of its business logic.
    async fn run(&mut self) {
        loop {
            tokio::select! {
                _ = next_tick(&mut self.ticker) => self.handle_tick(),
                command = self.commands.recv() => match command {
                    Some(Command::Stop { responder }) => {
                        self.commands.close();
                        self.ticker = None;
                        let _ = responder.send(());
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => break,
                },
            }
            self.sync_ticker();
        }
        tracing::debug!("timer worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start => {
                self.engine.start();
            }
            Command::Pause => {
                if let Some(completion) = self.engine.pause() {
                    self.emit_completion(completion);
                }
            }
            Command::Resume => {
                self.engine.resume();
            }
            Command::Reset => self.engine.reset(),
            Command::Skip => {
                let completion = self.engine.skip();
                self.emit_completion(completion);
            }
            Command::UpdateDuration { mode, minutes } => self.engine.update_duration(mode, minutes),
            Command::AddTask { text } => {
                self.engine.add_task(&text);
            }
            Command::ToggleTask { id } => self.engine.toggle_task(&id),
            Command::DeleteTask { id } => self.engine.delete_task(&id),
            Command::ClearCompletedTasks => self.engine.clear_completed_tasks(),
            Command::UpdateNotes { text } => self.engine.update_notes(text),
            Command::ClearHistory => self.engine.clear_history(),
            Command::Snapshot { responder } => {
                self.handle_tick();
                let _ = responder.send(self.engine.snapshot());
            }
            Command::Tasks { responder } => {
                let _ = responder.send(self.engine.tasks().to_vec());
            }
            Command::Notes { responder } => {
                let _ = responder.send(self.engine.notes().to_owned());
            }
            Command::History { responder } => {
                let _ = responder.send(self.engine.history().to_vec());
            }
            Command::TodayStats { responder } => {
                let _ = responder.send(self.engine.today_stats());
            }
            Command::WeekStats { responder } => {
                let _ = responder.send(self.engine.week_stats());
            }
            Command::Stop { .. } => unreachable!("`Stop` is handled by the run loop"),
        }
    }

    fn handle_tick(&mut self) {
        let before = self.engine.time_left();
        match self.engine.tick() {
            Some(completion) => self.emit_completion(completion),
            None if self.engine.time_left() != before => {
                let _ = self.events.send(EngineEvent::Tick {
                    time_left: self.engine.time_left(),
                });
            }
            None => {}
        }
    }

    fn emit_completion(&self, completion: Completion) {
        // Nobody listening is fine.
        let _ = self.events.send(EngineEvent::Completed(completion));
    }

    /// Arm the poller when the engine starts running, drop it as soon as it
    /// stops.
    fn sync_ticker(&mut self) {
        let running = self.engine.status() == TimerStatus::Running;
        match (running, self.ticker.is_some()) {
            (true, false) => {
                let period = self.config.tick_interval;
                let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.ticker = Some(ticker);
                tracing::trace!(?period, "tick poller armed");
            }
            (false, true) => {
                self.ticker = None;
                tracing::trace!("tick poller cancelled");
            }
            _ => {}
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) -> Instant {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::domain::engine::testing::{MapStore, RecordingCue, EPOCH_MS};
    use crate::domain::entity::TimerMode;
    use crate::domain::outbound::Clock;
    use crate::domain::worker::handle::event_channel;

    struct VirtualClock(Instant);

    impl Clock for VirtualClock {
        fn now_ms(&self) -> i64 {
            EPOCH_MS + (Instant::now() - self.0).as_millis() as i64
        }
    }

    fn new_routine() -> (tokio::sync::mpsc::Sender<Command>, WorkerRoutine) {
        let engine = PomodoroEngine::load(
            Arc::new(MapStore::default()),
            Arc::new(VirtualClock(Instant::now())),
            Arc::new(RecordingCue::default()),
        );
        let (sender, receiver) = tokio::sync::mpsc::channel(8);
        let routine = WorkerRoutine::new(engine, receiver, event_channel(), WorkerConfig::default());
        (sender, routine)
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_follows_status() {
        let (_sender, mut routine) = new_routine();
        routine.sync_ticker();
        assert!(routine.ticker.is_none());

        routine.handle_command(Command::Start);
        routine.sync_ticker();
        assert!(routine.ticker.is_some());

        routine.handle_command(Command::Pause);
        routine.sync_ticker();
        assert!(routine.ticker.is_none());

        routine.handle_command(Command::Resume);
        routine.sync_ticker();
        assert!(routine.ticker.is_some());

        routine.handle_command(Command::Reset);
        routine.sync_ticker();
        assert!(routine.ticker.is_none());

        routine.handle_command(Command::Start);
        routine.sync_ticker();
        routine.handle_command(Command::Skip);
        routine.sync_ticker();
        assert!(routine.ticker.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_is_not_rearmed_while_running() {
        let (_sender, mut routine) = new_routine();
        let armed_at = Instant::now();
        routine.handle_command(Command::Start);
        routine.sync_ticker();

        tokio::time::advance(Duration::from_millis(100)).await;
        routine.handle_command(Command::Start);
        routine.handle_command(Command::Resume);
        routine.sync_ticker();

        // Still scheduled against the first arming, not re-anchored at +100ms.
        routine.ticker.as_mut().unwrap().tick().await;
        assert_eq!(Instant::now() - armed_at, Duration::from_millis(250));
        assert_eq!(routine.engine.status(), TimerStatus::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_emits_countdown_and_completion() {
        let (_sender, mut routine) = new_routine();
        let mut events = routine.events.subscribe();
        routine.engine.update_duration(TimerMode::Work, 1);
        routine.handle_command(Command::Start);

        tokio::time::advance(Duration::from_millis(400)).await;
        routine.handle_tick();
        assert!(events.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(700)).await;
        routine.handle_tick();
        assert_eq!(events.try_recv().unwrap(), EngineEvent::Tick { time_left: 59 });

        tokio::time::advance(Duration::from_secs(59)).await;
        routine.handle_tick();
        match events.try_recv().unwrap() {
            EngineEvent::Completed(completion) => {
                assert_eq!(completion.record.mode, TimerMode::Work);
                assert_eq!(completion.record.duration, 60);
                assert_eq!(completion.next, TimerMode::ShortBreak);
            }
            other => unreachable!("unexpected event {other:?}"),
        }
    }
}
