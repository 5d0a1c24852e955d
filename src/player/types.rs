/// Common types shared by the controller and its front ends

/// Snapshot of the engine-owned playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub paused: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    pub muted: bool,
    pub playback_rate: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            paused: true,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
        }
    }
}

/// Direction of a continuous wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindDirection {
    Forward,
    Backward,
}

impl WindDirection {
    pub fn opposite(self) -> Self {
        match self {
            WindDirection::Forward => WindDirection::Backward,
            WindDirection::Backward => WindDirection::Forward,
        }
    }

    /// Sign applied to each wind step.
    pub fn sign(self) -> f64 {
        match self {
            WindDirection::Forward => 1.0,
            WindDirection::Backward => -1.0,
        }
    }
}

/// The two playback rates the speed button cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackRate {
    Normal,
    Double,
}

impl PlaybackRate {
    pub fn as_f64(self) -> f64 {
        match self {
            PlaybackRate::Normal => 1.0,
            PlaybackRate::Double => 2.0,
        }
    }

    /// The rate a toggle selects from whatever the engine currently reports.
    /// Only an exact 1x goes to 2x; anything else falls back to 1x.
    pub fn toggled_from(current: f64) -> Self {
        if current == 1.0 {
            PlaybackRate::Double
        } else {
            PlaybackRate::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackRate::Normal => "x1",
            PlaybackRate::Double => "x2",
        }
    }

    /// Label for the speed button while the engine runs at `current`:
    /// it names the rate the next press selects.
    pub fn button_label(current: f64) -> &'static str {
        Self::toggled_from(current).label()
    }
}

/// Icons the control widgets can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Play,
    Pause,
    VolumeMuted,
    VolumeLow,
    VolumeHigh,
    Expand,
    Compress,
}

/// Everything a front end needs to redraw the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub playback: PlaybackState,
    pub source: Option<String>,
    pub wind: Option<WindDirection>,
    /// Whether a wind task is scheduled right now
    pub wind_task_active: bool,
    pub play_icon: Icon,
    pub volume_icon: Icon,
    pub fullscreen_icon: Icon,
    pub fullscreen: bool,
    pub cursor_visible: bool,
    pub controls_displayed: bool,
    pub preview_time: Option<f64>,
    pub speed_label: String,
    pub timer_text: String,
}
