pub mod duration;
pub mod mode;
pub mod notification;
pub mod session;
pub mod settings;
pub mod task;

pub use duration::PhaseDuration;
pub use mode::{TimerMode, TimerStatus};
pub use notification::CueMessage;
pub use session::SessionRecord;
pub use settings::{Durations, PomodoroSettings};
pub use task::{RecordId, Task};
