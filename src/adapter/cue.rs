use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use notify_rust::Notification;
use snafu::prelude::*;

use crate::domain::entity::{CueMessage, TimerMode};
use crate::domain::outbound::{CueError, CuePort};

/// One [`CueMessage`] per [`TimerMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueMessages {
    pub work: CueMessage,
    pub short_break: CueMessage,
    pub long_break: CueMessage,
}

impl CueMessages {
    /// Get the message announcing the end of `mode`.
    pub fn get(&self, mode: TimerMode) -> &CueMessage {
        match mode {
            TimerMode::Work => &self.work,
            TimerMode::ShortBreak => &self.short_break,
            TimerMode::LongBreak => &self.long_break,
        }
    }
}

/// A [`CuePort`] showing a desktop notification.
#[derive(Debug, Clone)]
pub struct DesktopCue {
    app_name: String,
    messages: CueMessages,
}

impl DesktopCue {
    pub fn new(app_name: String, messages: CueMessages) -> Self {
        Self { app_name, messages }
    }
}

impl CuePort for DesktopCue {
    fn play(&self, mode: TimerMode) -> Result<(), CueError> {
        let message = self.messages.get(mode);
        let mut notification = Notification::new();
        notification.appname(&self.app_name);
        notification.summary(message.summary());

        if let Some(body) = message.body() {
            notification.body(body);
        }

        if let Err(err) = notification.show() {
            whatever!("Could not show notification: {err}");
        }

        Ok(())
    }
}

/// A [`CuePort`] ringing the terminal bell.
#[derive(Debug)]
pub struct BellCue<W = Stdout> {
    out: Mutex<W>,
}

impl BellCue {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for BellCue {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> BellCue<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send + 'static> CuePort for BellCue<W> {
    fn play(&self, _mode: TimerMode) -> Result<(), CueError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.write_all(b"\x07").and_then(|()| out.flush()) {
            whatever!("Could not ring the bell: {err}");
        }
        Ok(())
    }
}

/// A [`CuePort`] that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl CuePort for SilentCue {
    fn play(&self, mode: TimerMode) -> Result<(), CueError> {
        tracing::trace!(%mode, "silent cue");
        Ok(())
    }
}
