pub mod errors;
pub mod timecode;
pub mod timer;

pub use errors::{ControlError, Result};
pub use timecode::format_timecode;
pub use timer::ScheduledTask;
