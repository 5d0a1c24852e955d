#[cfg(feature = "mpv")]
pub mod mpv_player;
pub mod traits;
pub mod types;

#[cfg(feature = "mpv")]
pub use mpv_player::{MpvMediaElement, spawn_event_pump};
pub use traits::{MediaElement, MediaEvent};
pub use types::{ControllerSnapshot, Icon, PlaybackRate, PlaybackState, WindDirection};
