//! Plain-text views of engine state.

use std::fmt::Write;

use chrono::Local;

use crate::domain::engine::{Completion, DayStats, EngineSnapshot, WeekDayStats};
use crate::domain::entity::{PomodoroSettings, SessionRecord, Task, TimerMode, TimerStatus};

/// How many sessions `history` lists.
pub const HISTORY_LINES: usize = 10;

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format seconds as a coarse amount such as `1h 05m` or `25m`.
pub fn amount(seconds: u64) -> String {
    let minutes = seconds / 60;
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

pub fn status(snapshot: &EngineSnapshot) -> String {
    let state = match snapshot.status {
        TimerStatus::Idle => "ready",
        TimerStatus::Running => "running",
        TimerStatus::Paused => "paused",
    };
    format!(
        "{} {} [{}] sessions completed: {}",
        snapshot.mode.label(),
        clock(snapshot.time_left),
        state,
        snapshot.sessions_completed
    )
}

pub fn countdown(time_left: u64) -> String {
    format!("{} left", clock(time_left))
}

pub fn completion(completion: &Completion) -> String {
    format!(
        "{} finished. Up next: {}",
        completion.record.mode.label(),
        completion.next.label()
    )
}

pub fn settings(settings: &PomodoroSettings) -> String {
    [TimerMode::Work, TimerMode::ShortBreak, TimerMode::LongBreak]
        .into_iter()
        .map(|mode| format!("{:<12}{}", mode.label(), amount(settings.duration(mode).seconds())))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks".to_owned();
    }

    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let mark = if task.is_completed() { 'x' } else { ' ' };
            format!("{:>2}. [{mark}] {}", index + 1, task.text())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn notes(notes: &str) -> String {
    if notes.is_empty() {
        "No notes".to_owned()
    } else {
        notes.to_owned()
    }
}

pub fn today(stats: &DayStats) -> String {
    format!(
        "Today: {} sessions, {} focused",
        stats.sessions,
        amount(stats.focus_time)
    )
}

pub fn week(days: &[WeekDayStats]) -> String {
    let mut out = String::new();
    for day in days {
        let _ = writeln!(
            out,
            "{} {}  {:<10}{:>3}  {}",
            day.label,
            day.date.format("%m-%d"),
            "#".repeat(day.stats.sessions as usize),
            day.stats.sessions,
            amount(day.stats.focus_time)
        );
    }
    out.truncate(out.trim_end().len());
    out
}

/// The newest [`HISTORY_LINES`] sessions, newest first, in local time.
pub fn history(records: &[SessionRecord]) -> String {
    if records.is_empty() {
        return "No sessions recorded".to_owned();
    }

    records
        .iter()
        .rev()
        .take(HISTORY_LINES)
        .map(|record| {
            format!(
                "{}  {:<12}{}",
                record.completed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                record.mode.label(),
                amount(record.duration)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
