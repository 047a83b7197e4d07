use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;

use crate::domain::engine::PomodoroEngine;
use crate::domain::entity::{SessionRecord, TimerMode};

/// Work done within one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    pub sessions: u64,
    /// Seconds.
    pub focus_time: u64,
}

/// [`DayStats`] of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDayStats {
    pub date: NaiveDate,
    /// Short weekday name such as `Mon`.
    pub label: String,
    #[serde(flatten)]
    pub stats: DayStats,
}

impl PomodoroEngine {
    /// Work sessions completed since local midnight.
    pub fn today_stats(&self) -> DayStats {
        today(&self.history, &self.clock.now().with_timezone(&Local))
    }

    /// Work sessions of each of the last seven local days, oldest first.
    pub fn week_stats(&self) -> Vec<WeekDayStats> {
        week(&self.history, &self.clock.now().with_timezone(&Local))
    }
}

pub(crate) fn today<Tz: TimeZone>(history: &[SessionRecord], now: &DateTime<Tz>) -> DayStats {
    let start = start_of_day(&now.timezone(), now.date_naive());
    aggregate(history, |at| at >= start)
}

pub(crate) fn week<Tz: TimeZone>(history: &[SessionRecord], now: &DateTime<Tz>) -> Vec<WeekDayStats> {
    let tz = now.timezone();
    let today = now.date_naive();

    (0..7)
        .rev()
        .map(|days_ago| {
            let date = today - TimeDelta::days(days_ago);
            let start = start_of_day(&tz, date);
            let end = start + TimeDelta::hours(24);
            WeekDayStats {
                date,
                label: date.format("%a").to_string(),
                stats: aggregate(history, |at| at >= start && at < end),
            }
        })
        .collect()
}

fn aggregate<F>(history: &[SessionRecord], within: F) -> DayStats
where
    F: Fn(DateTime<Utc>) -> bool,
{
    history
        .iter()
        .filter(|record| record.mode == TimerMode::Work && within(record.completed_at))
        .fold(DayStats::default(), |stats, record| DayStats {
            sessions: stats.sessions.saturating_add(1),
            focus_time: stats.focus_time.saturating_add(record.duration),
        })
}

/// Local midnight of `date`. Days whose midnight is skipped by a DST change
/// start an hour later.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
