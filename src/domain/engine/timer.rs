use crate::domain::engine::{Countdown, PomodoroEngine};
use crate::domain::entity::{PhaseDuration, SessionRecord, TimerMode, TimerStatus};
use crate::domain::repository::StoreKey;
use crate::tracing_report;

/// Outcome of a finished session, either by countdown or by skipping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub record: SessionRecord,
    pub next: TimerMode,
}

impl PomodoroEngine {
    /// Start counting down from the current time left. Only valid when idle.
    pub fn start(&mut self) -> TimerStatus {
        match self.countdown {
            Countdown::Idle => self.run_from_now(),
            other => tracing::debug!(status = %other.status(), "ignoring start"),
        }
        self.status()
    }

    /// Freeze the countdown. Only valid when running.
    ///
    /// Returns the completion if the phase turned out to be over already.
    pub fn pause(&mut self) -> Option<Completion> {
        let Countdown::Running { end_at_ms } = self.countdown else {
            tracing::debug!(status = %self.status(), "ignoring pause");
            return None;
        };

        self.time_left = self.remaining_until(end_at_ms);
        if self.time_left == 0 {
            return Some(self.complete());
        }

        self.countdown = Countdown::Paused;
        None
    }

    /// Continue a paused countdown. Only valid when paused.
    pub fn resume(&mut self) -> TimerStatus {
        match self.countdown {
            Countdown::Paused => self.run_from_now(),
            other => tracing::debug!(status = %other.status(), "ignoring resume"),
        }
        self.status()
    }

    /// Go back to idle with the full duration of the current mode.
    pub fn reset(&mut self) {
        self.countdown = Countdown::Idle;
        self.time_left = self.settings.duration(self.mode).seconds();
    }

    /// Finish the current session right away, regardless of time left.
    pub fn skip(&mut self) -> Completion {
        self.complete()
    }

    /// Refresh the time left from the end timestamp. Completes the session
    /// once nothing is left. Does nothing unless running.
    pub fn tick(&mut self) -> Option<Completion> {
        let Countdown::Running { end_at_ms } = self.countdown else {
            return None;
        };

        self.time_left = self.remaining_until(end_at_ms);
        (self.time_left == 0).then(|| self.complete())
    }

    /// Change the configured duration of `mode` to `minutes`, clamped into the
    /// allowed range. The idle display of the current mode follows the change
    /// immediately; a live countdown is never touched.
    pub fn update_duration(&mut self, mode: TimerMode, minutes: i64) {
        let duration = PhaseDuration::from_minutes(minutes);
        self.settings.durations.set(mode, duration);
        self.persisted.save(StoreKey::Settings, &self.settings);

        if mode == self.mode && self.countdown == Countdown::Idle {
            self.time_left = duration.seconds();
        }
    }

    fn run_from_now(&mut self) {
        let end_at_ms = self
            .clock
            .now_ms()
            .saturating_add((self.time_left as i64).saturating_mul(1000));
        self.countdown = Countdown::Running { end_at_ms };
    }

    fn remaining_until(&self, end_at_ms: i64) -> u64 {
        let remaining_ms = end_at_ms.saturating_sub(self.clock.now_ms()).max(0);
        // Whole seconds, rounded up, so the display only reads 0 at the end.
        (remaining_ms as u64).div_ceil(1000)
    }

    fn complete(&mut self) -> Completion {
        let finished = self.mode;
        self.countdown = Countdown::Idle;

        if let Err(err) = self.cue.play(finished) {
            tracing_report!(err, "could not play cue");
        }

        let record = SessionRecord::new(finished, self.settings.duration(finished), self.clock.now());
        self.history.push(record.clone());
        self.persisted.save(StoreKey::History, &self.history);

        if finished == TimerMode::Work {
            self.sessions_completed = self.sessions_completed.saturating_add(1);
            self.persisted
                .save(StoreKey::SessionsCompleted, &self.sessions_completed);
        }

        let next = finished.next(self.sessions_completed);
        self.mode = next;
        self.time_left = self.settings.duration(next).seconds();

        tracing::info!(
            finished = %finished,
            next = %next,
            sessions_completed = self.sessions_completed,
            "session complete"
        );

        Completion { record, next }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::domain::engine::testing::*;
    use crate::domain::entity::{TimerMode, TimerStatus};
    use crate::domain::outbound::{CuePort, MockCuePort};
    use crate::domain::repository::{StateStore, StoreKey};

    use super::*;

    #[test]
    fn start_then_read() {
        let Fixture { mut engine, .. } = fixture();
        assert_eq!(engine.start(), TimerStatus::Running);
        assert_eq!(engine.time_left(), 1500);
        assert!(engine.tick().is_none());
        assert_eq!(engine.time_left(), 1500);
    }

    #[test]
    fn countdown_follows_wall_clock() {
        let Fixture {
            mut engine, clock, ..
        } = fixture();
        engine.start();

        clock.advance_secs(100);
        assert!(engine.tick().is_none());
        assert_eq!(engine.time_left(), 1400);

        // A late tick lands on the same value as many punctual ones.
        clock.advance_ms(599_400);
        assert!(engine.tick().is_none());
        assert_eq!(engine.time_left(), 801);

        clock.advance_ms(600);
        engine.tick();
        assert_eq!(engine.time_left(), 800);
    }

    #[test]
    fn countdown_reaches_zero() {
        let Fixture {
            mut engine,
            clock,
            cue,
            ..
        } = fixture();
        engine.start();

        clock.advance_secs(1499);
        assert!(engine.tick().is_none());
        assert_eq!(engine.time_left(), 1);

        clock.advance_secs(5);
        let completion = engine.tick().unwrap();
        assert_eq!(completion.record.mode, TimerMode::Work);
        assert_eq!(completion.record.duration, 1500);
        assert_eq!(completion.next, TimerMode::ShortBreak);

        assert_eq!(engine.status(), TimerStatus::Idle);
        assert_eq!(engine.mode(), TimerMode::ShortBreak);
        assert_eq!(engine.time_left(), 300);
        assert_eq!(engine.sessions_completed(), 1);
        assert_eq!(*cue.0.lock().unwrap(), vec![TimerMode::Work]);

        // Idle engines ignore ticks.
        clock.advance_secs(1000);
        assert!(engine.tick().is_none());
        assert_eq!(engine.time_left(), 300);
    }

    #[test]
    fn pause_and_resume_preserve_time() {
        let Fixture {
            mut engine, clock, ..
        } = fixture();
        engine.start();
        clock.advance_secs(200);
        assert!(engine.pause().is_none());
        assert_eq!(engine.status(), TimerStatus::Paused);
        assert_eq!(engine.time_left(), 1300);

        clock.advance_secs(10_000);
        assert!(engine.tick().is_none());
        assert_eq!(engine.time_left(), 1300);

        assert_eq!(engine.resume(), TimerStatus::Running);
        clock.advance_secs(300);
        engine.tick();
        assert_eq!(engine.time_left(), 1000);
    }

    #[test]
    fn invalid_transitions_are_ignored() {
        let Fixture {
            mut engine, clock, ..
        } = fixture();
        assert!(engine.pause().is_none());
        assert_eq!(engine.resume(), TimerStatus::Idle);

        engine.start();
        clock.advance_secs(10);
        assert_eq!(engine.start(), TimerStatus::Running);
        assert_eq!(engine.resume(), TimerStatus::Running);
        engine.tick();
        assert_eq!(engine.time_left(), 1490);

        engine.pause();
        assert_eq!(engine.start(), TimerStatus::Paused);
        assert!(engine.pause().is_none());
        assert_eq!(engine.status(), TimerStatus::Paused);
    }

    #[test]
    fn pause_after_deadline_completes() {
        let Fixture {
            mut engine, clock, ..
        } = fixture();
        engine.start();
        clock.advance_secs(2000);
        let completion = engine.pause().unwrap();
        assert_eq!(completion.next, TimerMode::ShortBreak);
        assert_eq!(engine.status(), TimerStatus::Idle);
    }

    #[test]
    fn reset_from_any_status() {
        let Fixture {
            mut engine, clock, ..
        } = fixture();

        engine.start();
        clock.advance_secs(60);
        engine.tick();
        engine.reset();
        assert_eq!(engine.status(), TimerStatus::Idle);
        assert_eq!(engine.time_left(), 1500);

        engine.start();
        clock.advance_secs(60);
        engine.pause();
        engine.reset();
        assert_eq!(engine.status(), TimerStatus::Idle);
        assert_eq!(engine.time_left(), 1500);

        engine.skip();
        engine.reset();
        assert_eq!(engine.mode(), TimerMode::ShortBreak);
        assert_eq!(engine.time_left(), 300);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn skip_records_configured_duration() {
        let Fixture {
            mut engine,
            clock,
            store,
            ..
        } = fixture();

        assert_eq!(engine.start(), TimerStatus::Running);
        assert_eq!(engine.time_left(), 1500);
        clock.advance_secs(42);

        let completion = engine.skip();
        assert_eq!(completion.record.mode, TimerMode::Work);
        assert_eq!(completion.record.duration, 1500);
        assert_eq!(engine.mode(), TimerMode::ShortBreak);
        assert_eq!(engine.time_left(), 300);
        assert_eq!(engine.status(), TimerStatus::Idle);
        assert_eq!(engine.sessions_completed(), 1);
        assert_eq!(engine.history().len(), 1);

        engine.start();
        engine.skip();
        assert_eq!(engine.mode(), TimerMode::Work);
        assert_eq!(engine.time_left(), 1500);
        assert_eq!(engine.sessions_completed(), 1);
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.history()[1].mode, TimerMode::ShortBreak);
        assert_eq!(engine.history()[1].duration, 300);

        assert_eq!(store.get(StoreKey::SessionsCompleted).as_deref(), Some("1"));
        let stored: Vec<SessionRecord> =
            serde_json::from_str(&store.get(StoreKey::History).unwrap()).unwrap();
        assert_eq!(stored, engine.history());
    }

    #[test]
    fn long_break_every_fourth_session() {
        let Fixture { mut engine, .. } = fixture();
        let mut routes = Vec::new();

        for _ in 0..5 {
            assert_eq!(engine.mode(), TimerMode::Work);
            routes.push(engine.skip().next);
            engine.skip();
        }

        assert_eq!(
            routes,
            vec![
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::LongBreak,
                TimerMode::ShortBreak,
            ]
        );
        assert_eq!(engine.sessions_completed(), 5);
    }

    #[test]
    fn cadence_continues_from_stored_counter() {
        let store = Arc::new(MapStore::default());
        store.put(StoreKey::SessionsCompleted, "7");
        let Fixture { mut engine, .. } = fixture_with(store);

        assert_eq!(engine.skip().next, TimerMode::LongBreak);
        assert_eq!(engine.time_left(), 900);
        assert_eq!(engine.sessions_completed(), 8);
    }

    #[test]
    fn stored_counter_at_limit_saturates() {
        let store = Arc::new(MapStore::default());
        store.put(StoreKey::SessionsCompleted, &u64::MAX.to_string());
        let Fixture {
            mut engine, store, ..
        } = fixture_with(store);

        let completion = engine.skip();
        assert_eq!(completion.next, TimerMode::ShortBreak);
        assert_eq!(engine.sessions_completed(), u64::MAX);
        assert_eq!(
            store.get(StoreKey::SessionsCompleted),
            Some(u64::MAX.to_string())
        );
    }

    #[test]
    fn update_duration_clamps_and_persists() {
        let Fixture {
            mut engine, store, ..
        } = fixture();

        for (minutes, expected) in [(50, 3000), (0, 60), (-3, 60), (121, 7200), (1, 60)] {
            engine.update_duration(TimerMode::LongBreak, minutes);
            assert_eq!(
                engine.settings().duration(TimerMode::LongBreak).seconds(),
                expected
            );
        }

        let stored: serde_json::Value =
            serde_json::from_str(&store.get(StoreKey::Settings).unwrap()).unwrap();
        assert_eq!(stored["durations"]["longBreak"], 60);
        assert_eq!(engine.time_left(), 1500);
    }

    #[test]
    fn update_duration_refreshes_idle_display() {
        let Fixture { mut engine, .. } = fixture();
        engine.update_duration(TimerMode::Work, 50);
        assert_eq!(engine.settings().durations.work.seconds(), 3000);
        assert_eq!(engine.time_left(), 3000);
        assert_eq!(engine.status(), TimerStatus::Idle);
    }

    #[test]
    fn update_duration_never_perturbs_live_countdown() {
        let Fixture {
            mut engine, clock, ..
        } = fixture();
        engine.start();
        clock.advance_secs(100);
        engine.update_duration(TimerMode::Work, 10);
        engine.tick();
        assert_eq!(engine.time_left(), 1400);

        engine.pause();
        engine.update_duration(TimerMode::Work, 90);
        assert_eq!(engine.time_left(), 1400);

        // The record carries the configured duration at completion time.
        let completion = engine.skip();
        assert_eq!(completion.record.duration, 5400);
    }

    #[test]
    fn cue_failure_is_swallowed() {
        let mut cue = MockCuePort::new();
        cue.expect_play()
            .times(1)
            .returning(|_| snafu::whatever!("no audio device"));

        let store = Arc::new(MapStore::default());
        let mut engine = PomodoroEngine::load(
            store as Arc<dyn StateStore>,
            ManualClock::new(),
            Arc::new(cue) as Arc<dyn CuePort>,
        );

        let completion = engine.skip();
        assert_eq!(completion.next, TimerMode::ShortBreak);
        assert_eq!(engine.history().len(), 1);
    }
}
