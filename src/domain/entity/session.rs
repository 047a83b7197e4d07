use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entity::{PhaseDuration, RecordId, TimerMode};

/// A finished session. Records are only ever appended, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: RecordId,
    pub mode: TimerMode,
    /// Seconds scheduled for the session, within the [`PhaseDuration`] range.
    #[serde(deserialize_with = "clamped_seconds")]
    pub duration: u64,
    pub completed_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Number of days a record is kept in history.
    pub const RETENTION_DAYS: i64 = 30;

    pub fn new(mode: TimerMode, duration: PhaseDuration, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(),
            mode,
            duration: duration.seconds(),
            completed_at,
        }
    }

    /// Returns `true` if this record is still within the retention window at
    /// `now`.
    pub fn is_retained(&self, now: DateTime<Utc>) -> bool {
        self.completed_at > now - TimeDelta::days(Self::RETENTION_DAYS)
    }
}

fn clamped_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    PhaseDuration::deserialize(deserializer).map(PhaseDuration::seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_record_retention() {
        let now = Utc::now();
        let duration = PhaseDuration::clamped(1500);
        let fresh = SessionRecord::new(TimerMode::Work, duration, now - TimeDelta::days(29));
        let edge = SessionRecord::new(TimerMode::Work, duration, now - TimeDelta::days(30));
        let inside = SessionRecord::new(
            TimerMode::Work,
            duration,
            now - TimeDelta::days(30) + TimeDelta::milliseconds(1),
        );

        assert!(fresh.is_retained(now));
        assert!(inside.is_retained(now));
        assert!(!edge.is_retained(now));
    }

    #[test]
    fn session_record_json() {
        let record = SessionRecord::new(TimerMode::ShortBreak, PhaseDuration::clamped(300), Utc::now());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["mode"], "shortBreak");
        assert_eq!(value["duration"], 300);
        assert!(value["completedAt"].is_string());

        let back: SessionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn session_record_duration_is_clamped_on_read() {
        let raw = format!(
            r#"{{"id":"a","mode":"work","duration":{},"completedAt":"2024-03-13T11:00:00Z"}}"#,
            u64::MAX
        );
        let record: SessionRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.duration, PhaseDuration::MAX_SECONDS);

        let raw = r#"{"id":"b","mode":"work","duration":0,"completedAt":"2024-03-13T11:00:00Z"}"#;
        let record: SessionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.duration, PhaseDuration::MIN_SECONDS);
    }
}
