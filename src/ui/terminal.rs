//! Line-oriented front end for the `playdeck` binary.
//!
//! Commands read from stdin become [`ControlInput`]s, and the widget set
//! below records what the controller draws so it can be printed as a
//! single status line.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::player::types::{ControllerSnapshot, Icon, WindDirection};
use crate::ui::bindings::{Bounds, ControlRole, ControlWidget, FrameHost, WidgetLookup};
use crate::ui::player_controls::{ControlInput, Key, PlayerHandle};
use crate::utils::{ControlError, Result, format_timecode};

/// Width of the scrub bar in columns. `seek <x>` and `hover <x>` take a
/// column in `0..=BAR_COLUMNS`.
pub const BAR_COLUMNS: f64 = 40.0;

pub const HELP: &str = "commands: play stop rwd fwd mute vol+ vol- full speed left right \
                        seek <col> hover <col> leave key <name> status help quit";

/// A parsed line of terminal input.
#[derive(Debug)]
pub enum TerminalCommand {
    Input(ControlInput),
    Status,
    Help,
    Quit,
}

/// Parse one input line. Returns `None` for blank, unknown or malformed
/// commands.
pub fn parse_command(line: &str) -> Option<TerminalCommand> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let argument = words.next();

    let column = || argument.and_then(|a| a.parse::<f64>().ok());

    let input = match command {
        "play" => ControlInput::PlayPause,
        "stop" => ControlInput::Stop,
        "rwd" => ControlInput::Rewind,
        "fwd" => ControlInput::FastForward,
        "mute" => ControlInput::ToggleMute,
        "vol+" => ControlInput::VolumeUp,
        "vol-" => ControlInput::VolumeDown,
        "full" => ControlInput::ToggleFullscreen,
        "speed" => ControlInput::ToggleSpeed,
        "left" => ControlInput::Key(Key::ArrowLeft),
        "right" => ControlInput::Key(Key::ArrowRight),
        "seek" => ControlInput::ScrubClick { x: column()? },
        "hover" => ControlInput::ScrubHover { x: column()? },
        "leave" => ControlInput::ScrubLeave,
        "key" => ControlInput::Key(Key::from_name(argument?)?),
        "status" => return Some(TerminalCommand::Status),
        "help" => return Some(TerminalCommand::Help),
        "quit" | "exit" => return Some(TerminalCommand::Quit),
        _ => return None,
    };
    Some(TerminalCommand::Input(input))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerminalWidgetState {
    pub icon: Option<Icon>,
    pub active: bool,
    pub text: String,
    pub width: f64,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct TerminalWidget {
    state: Mutex<TerminalWidgetState>,
    bounds: Bounds,
}

impl TerminalWidget {
    pub fn state(&self) -> TerminalWidgetState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn update<F: FnOnce(&mut TerminalWidgetState)>(&self, updater: F) {
        if let Ok(mut state) = self.state.lock() {
            updater(&mut state);
        }
    }
}

impl ControlWidget for TerminalWidget {
    fn set_icon(&self, icon: Icon) {
        self.update(|s| s.icon = Some(icon));
    }

    fn set_active(&self, active: bool) {
        self.update(|s| s.active = active);
    }

    fn set_text(&self, text: &str) {
        self.update(|s| s.text = text.to_string());
    }

    fn set_width(&self, width: f64) {
        self.update(|s| s.width = width);
    }

    fn set_visible(&self, visible: bool) {
        self.update(|s| s.visible = visible);
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Stand-in for the fullscreen container. A terminal cannot go
/// fullscreen, so the flag is only recorded and the change is reported
/// back to the controller the way a windowing host would.
#[derive(Debug)]
pub struct TerminalFrame {
    fullscreen: Mutex<bool>,
    cursor_visible: Mutex<bool>,
    notify: Mutex<Option<PlayerHandle>>,
}

impl Default for TerminalFrame {
    fn default() -> Self {
        Self {
            fullscreen: Mutex::new(false),
            cursor_visible: Mutex::new(true),
            notify: Mutex::new(None),
        }
    }
}

impl TerminalFrame {
    /// Deliver fullscreen changes to `handle` from now on
    pub fn attach(&self, handle: PlayerHandle) {
        if let Ok(mut notify) = self.notify.lock() {
            *notify = Some(handle);
        }
    }

    /// Drop the attached handle so the controller can wind down
    pub fn detach(&self) {
        if let Ok(mut notify) = self.notify.lock() {
            *notify = None;
        }
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible.lock().map(|v| *v).unwrap_or(true)
    }

    fn set_fullscreen(&self, fullscreen: bool) -> Result<()> {
        let mut current = self
            .fullscreen
            .lock()
            .map_err(|_| ControlError::Fullscreen("frame state lock poisoned".to_string()))?;
        if *current == fullscreen {
            return Ok(());
        }
        *current = fullscreen;
        drop(current);

        debug!("Terminal frame fullscreen: {}", fullscreen);
        if let Ok(notify) = self.notify.lock()
            && let Some(handle) = notify.as_ref()
            && let Err(e) = handle.fullscreen_changed(fullscreen)
        {
            warn!("Could not report fullscreen change: {}", e);
        }
        Ok(())
    }
}

impl FrameHost for TerminalFrame {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen.lock().map(|v| *v).unwrap_or(false)
    }

    fn request_fullscreen(&self) -> Result<()> {
        self.set_fullscreen(true)
    }

    fn exit_fullscreen(&self) -> Result<()> {
        self.set_fullscreen(false)
    }

    fn set_cursor_visible(&self, visible: bool) {
        if let Ok(mut cursor) = self.cursor_visible.lock() {
            *cursor = visible;
        }
    }
}

/// Every control role backed by a [`TerminalWidget`].
#[derive(Debug)]
pub struct TerminalWidgets {
    widgets: HashMap<ControlRole, Arc<TerminalWidget>>,
    frame: Arc<TerminalFrame>,
}

impl Default for TerminalWidgets {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWidgets {
    pub fn new() -> Self {
        let widgets = ControlRole::ALL
            .into_iter()
            .filter(|role| *role != ControlRole::Frame)
            .map(|role| {
                let bounds = if role == ControlRole::Timer {
                    Bounds {
                        x: 0.0,
                        width: BAR_COLUMNS,
                    }
                } else {
                    Bounds::default()
                };
                let widget = TerminalWidget {
                    state: Mutex::new(TerminalWidgetState::default()),
                    bounds,
                };
                (role, Arc::new(widget))
            })
            .collect();

        Self {
            widgets,
            frame: Arc::new(TerminalFrame::default()),
        }
    }

    pub fn frame_host(&self) -> &Arc<TerminalFrame> {
        &self.frame
    }

    pub fn widget_state(&self, role: ControlRole) -> TerminalWidgetState {
        self.widgets
            .get(&role)
            .map(|w| w.state())
            .unwrap_or_default()
    }

    /// One-line rendering of the overlay.
    pub fn status_line(&self, snapshot: &ControllerSnapshot) -> String {
        let play = match snapshot.play_icon {
            Icon::Pause => "||",
            _ => "> ",
        };

        let filled = (self.widget_state(ControlRole::TimerBar).width.round().max(0.0) as usize)
            .min(BAR_COLUMNS as usize);
        let bar = format!(
            "{}{}",
            "#".repeat(filled),
            "-".repeat(BAR_COLUMNS as usize - filled)
        );

        let volume = match snapshot.volume_icon {
            Icon::VolumeMuted => "muted".to_string(),
            _ => format!("{:.0}%", snapshot.playback.volume * 100.0),
        };

        let mut line = format!(
            "[{}] {} [{}] vol {} speed {}",
            play, snapshot.timer_text, bar, volume, snapshot.speed_label
        );

        match snapshot.wind {
            Some(WindDirection::Forward) => line.push_str(" >>"),
            Some(WindDirection::Backward) => line.push_str(" <<"),
            None => {}
        }
        if let Some(preview) = snapshot.preview_time {
            line.push_str(&format!(" preview {}", format_timecode(preview)));
        }
        if snapshot.fullscreen {
            line.push_str(" [full]");
        }
        if snapshot.source.is_none() {
            line.push_str(" (no media)");
        }
        line
    }
}

impl WidgetLookup for TerminalWidgets {
    fn find(&self, selector: &str) -> Option<Arc<dyn ControlWidget>> {
        let role = ControlRole::ALL
            .into_iter()
            .find(|role| role.selector() == selector)?;
        self.widgets
            .get(&role)
            .map(|widget| widget.clone() as Arc<dyn ControlWidget>)
    }

    fn frame(&self) -> Option<Arc<dyn FrameHost>> {
        Some(self.frame.clone() as Arc<dyn FrameHost>)
    }
}
