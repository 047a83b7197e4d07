use std::path::PathBuf;
use std::sync::Arc;

use lofi_focus::adapter::config::{self, Configuration, CueBackend};
use lofi_focus::adapter::{BellCue, CueMessages, DesktopCue, JsonFileStore, SilentCue, SystemClock};
use lofi_focus::domain::engine::PomodoroEngine;
use lofi_focus::domain::entity::TimerMode;
use lofi_focus::domain::outbound::CuePort;
use lofi_focus::domain::worker::{self, EngineHandle};
use lofi_focus::utils::xdg::{Xdg, XdgBaseKind};
use snafu::{prelude::*, Whatever};

use crate::cli::Arguments;

const APP_NAME: &str = "lofi-focus";

pub fn bootstrap(arg: &Arguments) -> Result<EngineHandle, Whatever> {
    let configuration = configuration(arg)?;
    let directory = storage_directory(&configuration)?;
    let cue = cue(&configuration)?;

    tracing::info!(directory = %directory.display(), "loading state");
    let engine = PomodoroEngine::load(
        Arc::new(JsonFileStore::new(directory)),
        Arc::new(SystemClock),
        cue,
    );

    Ok(worker::spawn(engine, configuration.worker_config()))
}

fn configuration(arg: &Arguments) -> Result<Configuration, Whatever> {
    let res = match &arg.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME),
    };

    res.whatever_context("Could not load configuration")
}

fn storage_directory(configuration: &Configuration) -> Result<PathBuf, Whatever> {
    if let Some(directory) = &configuration.storage.directory {
        return Ok(directory.clone());
    }

    Xdg::new(APP_NAME)
        .and_then(|xdg| xdg.directory(XdgBaseKind::Data))
        .whatever_context("Could not use XDG base directories")
}

fn cue(configuration: &Configuration) -> Result<Arc<dyn CuePort>, Whatever> {
    let cue: Arc<dyn CuePort> = match configuration.cue.backend {
        CueBackend::Desktop => {
            let message = |mode: TimerMode| {
                configuration
                    .cue_message(mode)
                    .whatever_context(format!("Invalid notification message for {mode}"))
            };
            let messages = CueMessages {
                work: message(TimerMode::Work)?,
                short_break: message(TimerMode::ShortBreak)?,
                long_break: message(TimerMode::LongBreak)?,
            };
            Arc::new(DesktopCue::new(APP_NAME.to_owned(), messages))
        }
        CueBackend::Bell => Arc::new(BellCue::new()),
        CueBackend::Silent => Arc::new(SilentCue),
    };

    Ok(cue)
}
