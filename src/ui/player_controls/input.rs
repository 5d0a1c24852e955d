use tokio::sync::oneshot;

use crate::player::traits::MediaEvent;
use crate::player::types::ControllerSnapshot;

/// Keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Char(char),
}

impl Key {
    /// Parse a key name as reported by keyboard events ("Space",
    /// "ArrowLeft", "m", ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Space" | " " => Some(Key::Space),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                    _ => None,
                }
            }
        }
    }
}

/// Inputs processed by the controller event loop
#[derive(Debug)]
pub enum ControlInput {
    /// Play button or Space
    PlayPause,
    /// Stop button
    Stop,
    /// Rewind button, toggles backward winding
    Rewind,
    /// Fast-forward button, toggles forward winding
    FastForward,
    /// Click on the scrub bar at a horizontal pointer position
    ScrubClick { x: f64 },
    /// Pointer moving over the scrub bar
    ScrubHover { x: f64 },
    /// Pointer left the scrub bar
    ScrubLeave,
    ToggleMute,
    VolumeUp,
    VolumeDown,
    ToggleFullscreen,
    /// The frame host entered or left fullscreen
    FullscreenChanged(bool),
    ToggleSpeed,
    Key(Key),
    /// Pointer moved over the media
    PointerMoved,
    /// Notification from the media engine
    Media(MediaEvent),
    /// Wind timer step
    WindTick { generation: u64 },
    /// Cursor autohide timer expired
    HideCursor { generation: u64 },
    /// Controls display timer expired
    HideControls { generation: u64 },
    Snapshot {
        respond_to: oneshot::Sender<ControllerSnapshot>,
    },
    Shutdown,
}
