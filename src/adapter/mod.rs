pub mod clock;
pub mod config;
pub mod cue;
pub mod store;

pub use clock::{SystemClock, TokioClock};
pub use cue::{BellCue, CueMessages, DesktopCue, SilentCue};
pub use store::{JsonFileStore, MemoryStore};
