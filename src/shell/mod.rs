//! Line-oriented front end driving an [`EngineHandle`].

pub mod command;
pub mod render;

pub use command::{HistoryAction, Line, ModeArg, ShellCommand, TaskCommand};

use std::io::Error as IoError;
use std::num::NonZeroUsize;

use snafu::prelude::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::RecvError;

use crate::domain::entity::{RecordId, TimerStatus};
use crate::domain::worker::{EngineError, EngineEvent, EngineHandle};

/// Whether the shell keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads commands line by line and prints the engine's answers and events.
pub struct Shell<W> {
    handle: EngineHandle,
    out: W,
}

impl<W: AsyncWrite + Unpin> Shell<W> {
    pub fn new(handle: EngineHandle, out: W) -> Self {
        Self { handle, out }
    }

    /// Serve `input` until `quit` or end of input, then stop the engine.
    ///
    /// # Errors
    ///
    /// This function will return an error if reading or writing fails, or if
    /// the engine stops answering.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<(), ShellError> {
        let mut lines = input.lines();
        let mut events = self.handle.subscribe();

        let snapshot = self.handle.snapshot().await.context(EngineSnafu)?;
        self.say(render::status(&snapshot)).await?;

        loop {
            // Events first, so they print right after the line that caused them.
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Ok(event) => self.show_event(event).await?,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "shell fell behind engine events");
                    }
                    Err(RecvError::Closed) => return Err(EngineError::Closed).context(EngineSnafu),
                },
                line = lines.next_line() => match line.context(ReadSnafu)? {
                    Some(line) => {
                        if self.execute(&line).await? == Flow::Quit {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }

        self.handle.stop().await.context(EngineSnafu)
    }

    /// Consume the shell and return its output.
    pub fn into_inner(self) -> W {
        self.out
    }

    async fn execute(&mut self, line: &str) -> Result<Flow, ShellError> {
        match Line::parse_line(line) {
            None => Ok(Flow::Continue),
            Some(Err(err)) => {
                self.say(err.render().to_string().trim_end()).await?;
                Ok(Flow::Continue)
            }
            Some(Ok(ShellCommand::Quit)) => Ok(Flow::Quit),
            Some(Ok(command)) => {
                self.dispatch(command).await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn dispatch(&mut self, command: ShellCommand) -> Result<(), ShellError> {
        let handle = self.handle.clone();
        match command {
            ShellCommand::Start => handle.start().await.context(EngineSnafu)?,
            ShellCommand::Pause => handle.pause().await.context(EngineSnafu)?,
            ShellCommand::Resume => handle.resume().await.context(EngineSnafu)?,
            ShellCommand::Toggle => self.toggle().await?,
            ShellCommand::Reset => handle.reset().await.context(EngineSnafu)?,
            ShellCommand::Skip => handle.skip().await.context(EngineSnafu)?,
            ShellCommand::Status => {}
            ShellCommand::Duration { mode, minutes } => {
                handle
                    .update_duration(mode.into(), minutes)
                    .await
                    .context(EngineSnafu)?;
                return self.show_settings().await;
            }
            ShellCommand::Settings => return self.show_settings().await,
            ShellCommand::Task(command) => return self.task(command).await,
            ShellCommand::Tasks => return self.show_tasks().await,
            ShellCommand::Notes { clear, text } => {
                if clear {
                    handle.update_notes(String::new()).await.context(EngineSnafu)?;
                } else if !text.is_empty() {
                    handle.update_notes(text.join(" ")).await.context(EngineSnafu)?;
                }
                let notes = handle.notes().await.context(EngineSnafu)?;
                return self.say(render::notes(&notes)).await;
            }
            ShellCommand::Stats => {
                let stats = handle.today_stats().await.context(EngineSnafu)?;
                return self.say(render::today(&stats)).await;
            }
            ShellCommand::Week => {
                let week = handle.week_stats().await.context(EngineSnafu)?;
                return self.say(render::week(&week)).await;
            }
            ShellCommand::History { action } => {
                if let Some(HistoryAction::Clear) = action {
                    handle.clear_history().await.context(EngineSnafu)?;
                }
                let history = handle.history().await.context(EngineSnafu)?;
                return self.say(render::history(&history)).await;
            }
            ShellCommand::Quit => return Ok(()),
        }

        let snapshot = handle.snapshot().await.context(EngineSnafu)?;
        self.say(render::status(&snapshot)).await
    }

    async fn toggle(&mut self) -> Result<(), ShellError> {
        let handle = &self.handle;
        let snapshot = handle.snapshot().await.context(EngineSnafu)?;
        let res = match snapshot.status {
            TimerStatus::Idle => handle.start().await,
            TimerStatus::Running => handle.pause().await,
            TimerStatus::Paused => handle.resume().await,
        };
        res.context(EngineSnafu)
    }

    async fn task(&mut self, command: TaskCommand) -> Result<(), ShellError> {
        let handle = self.handle.clone();
        match command {
            TaskCommand::Add { text } => {
                handle.add_task(text.join(" ")).await.context(EngineSnafu)?;
            }
            TaskCommand::Done { number } => match self.task_id(number).await? {
                Some(id) => handle.toggle_task(id).await.context(EngineSnafu)?,
                None => return self.say(format!("No task #{number}")).await,
            },
            TaskCommand::Rm { number } => match self.task_id(number).await? {
                Some(id) => handle.delete_task(id).await.context(EngineSnafu)?,
                None => return self.say(format!("No task #{number}")).await,
            },
            TaskCommand::Clear => handle.clear_completed_tasks().await.context(EngineSnafu)?,
        }
        self.show_tasks().await
    }

    /// Resolve a 1-based position in the current task list.
    async fn task_id(&self, number: NonZeroUsize) -> Result<Option<RecordId>, ShellError> {
        let tasks = self.handle.tasks().await.context(EngineSnafu)?;
        Ok(tasks.get(number.get() - 1).map(|task| task.id().clone()))
    }

    async fn show_tasks(&mut self) -> Result<(), ShellError> {
        let tasks = self.handle.tasks().await.context(EngineSnafu)?;
        self.say(render::tasks(&tasks)).await
    }

    async fn show_settings(&mut self) -> Result<(), ShellError> {
        let snapshot = self.handle.snapshot().await.context(EngineSnafu)?;
        self.say(render::settings(&snapshot.settings)).await
    }

    async fn show_event(&mut self, event: EngineEvent) -> Result<(), ShellError> {
        match event {
            EngineEvent::Tick { time_left } if time_left > 0 && time_left % 60 == 0 => {
                self.say(render::countdown(time_left)).await
            }
            EngineEvent::Tick { .. } => Ok(()),
            EngineEvent::Completed(completion) => {
                self.say(render::completion(&completion)).await
            }
        }
    }

    async fn say<S: AsRef<str>>(&mut self, text: S) -> Result<(), ShellError> {
        self.out
            .write_all(text.as_ref().as_bytes())
            .await
            .context(WriteSnafu)?;
        self.out.write_all(b"\n").await.context(WriteSnafu)?;
        self.out.flush().await.context(WriteSnafu)
    }
}

/// An error type for [`Shell::run`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ShellError {
    #[snafu(display("Could not read input"))]
    Read { source: IoError },
    #[snafu(display("Could not write output"))]
    Write { source: IoError },
    #[snafu(display("Lost the timer engine"))]
    Engine { source: EngineError },
}
