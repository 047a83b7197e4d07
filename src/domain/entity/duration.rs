use serde::{Deserialize, Deserializer, Serialize};

/// The duration of one timer phase represented in seconds, always kept within
/// [`PhaseDuration::MIN_SECONDS`] and [`PhaseDuration::MAX_SECONDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PhaseDuration(u64);

impl PhaseDuration {
    /// One minute.
    pub const MIN_SECONDS: u64 = 60;
    /// Two hours.
    pub const MAX_SECONDS: u64 = 7200;

    /// Create a [`PhaseDuration`] by clamping `seconds` into the allowed range.
    pub fn clamped(seconds: u64) -> Self {
        Self(seconds.clamp(Self::MIN_SECONDS, Self::MAX_SECONDS))
    }

    /// Create a [`PhaseDuration`] from a number of minutes typed in by the
    /// user. Negative and absurdly large inputs end up at the range bounds.
    pub fn from_minutes(minutes: i64) -> Self {
        let seconds = minutes.saturating_mul(60).max(0) as u64;
        Self::clamped(seconds)
    }

    /// Returns the number of seconds of this [`PhaseDuration`].
    pub fn seconds(self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for PhaseDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::clamped)
    }
}
