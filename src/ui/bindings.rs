use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

use crate::player::types::Icon;
use crate::utils::{ControlError, Result};

/// Named parts of the control panel, each found by a structural selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRole {
    Frame,
    Controls,
    Play,
    Stop,
    Rewind,
    FastForward,
    Timer,
    TimerText,
    TimerBar,
    Mute,
    VolumeUp,
    VolumeDown,
    FullScreen,
    Speed,
    Preview,
}

impl ControlRole {
    pub const ALL: [ControlRole; 15] = [
        ControlRole::Frame,
        ControlRole::Controls,
        ControlRole::Play,
        ControlRole::Stop,
        ControlRole::Rewind,
        ControlRole::FastForward,
        ControlRole::Timer,
        ControlRole::TimerText,
        ControlRole::TimerBar,
        ControlRole::Mute,
        ControlRole::VolumeUp,
        ControlRole::VolumeDown,
        ControlRole::FullScreen,
        ControlRole::Speed,
        ControlRole::Preview,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            ControlRole::Frame => "figure",
            ControlRole::Controls => ".controls",
            ControlRole::Play => ".play",
            ControlRole::Stop => ".stop",
            ControlRole::Rewind => ".rwd",
            ControlRole::FastForward => ".fwd",
            ControlRole::Timer => ".timer",
            ControlRole::TimerText => ".timer span",
            ControlRole::TimerBar => ".timer div",
            ControlRole::Mute => ".audio",
            ControlRole::VolumeUp => ".volume-up",
            ControlRole::VolumeDown => ".volume-down",
            ControlRole::FullScreen => ".full-screen",
            ControlRole::Speed => ".speed",
            ControlRole::Preview => ".preview",
        }
    }
}

/// Horizontal extent of a widget, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub width: f64,
}

/// A single widget of the control panel.
pub trait ControlWidget: Send + Sync {
    fn set_icon(&self, icon: Icon);
    /// Highlight state, used for the wind buttons and the controls strip
    fn set_active(&self, active: bool);
    fn set_text(&self, text: &str);
    fn set_width(&self, width: f64);
    fn set_visible(&self, visible: bool);
    fn bounds(&self) -> Bounds;
}

/// The fullscreen-capable container around the media.
pub trait FrameHost: Send + Sync {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&self) -> Result<()>;
    fn exit_fullscreen(&self) -> Result<()>;
    fn set_cursor_visible(&self, visible: bool);
}

/// Resolves selectors to live widgets, the way a document query would.
pub trait WidgetLookup {
    fn find(&self, selector: &str) -> Option<Arc<dyn ControlWidget>>;
    fn frame(&self) -> Option<Arc<dyn FrameHost>>;
}

/// Every control widget, resolved once and validated up front.
#[derive(Clone)]
pub struct ControlPanel {
    pub frame: Arc<dyn FrameHost>,
    pub controls: Arc<dyn ControlWidget>,
    pub play: Arc<dyn ControlWidget>,
    pub stop: Arc<dyn ControlWidget>,
    pub rewind: Arc<dyn ControlWidget>,
    pub fast_forward: Arc<dyn ControlWidget>,
    pub timer: Arc<dyn ControlWidget>,
    pub timer_text: Arc<dyn ControlWidget>,
    pub timer_bar: Arc<dyn ControlWidget>,
    pub mute: Arc<dyn ControlWidget>,
    pub volume_up: Arc<dyn ControlWidget>,
    pub volume_down: Arc<dyn ControlWidget>,
    pub full_screen: Arc<dyn ControlWidget>,
    pub speed: Arc<dyn ControlWidget>,
    pub preview: Arc<dyn ControlWidget>,
}

impl std::fmt::Debug for ControlPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlPanel")
            .field("roles", &ControlRole::ALL.len())
            .finish()
    }
}

impl ControlPanel {
    /// Resolve every role. Fails with a configuration error naming all
    /// roles that could not be found.
    pub fn bind(lookup: &dyn WidgetLookup) -> Result<Self> {
        let mut missing = Vec::new();

        let frame = lookup.frame();
        if frame.is_none() {
            missing.push(ControlRole::Frame);
        }

        let mut widgets: HashMap<ControlRole, Arc<dyn ControlWidget>> = HashMap::new();
        for role in ControlRole::ALL {
            if role == ControlRole::Frame {
                continue;
            }
            match lookup.find(role.selector()) {
                Some(widget) => {
                    widgets.insert(role, widget);
                }
                None => missing.push(role),
            }
        }

        if !missing.is_empty() {
            error!("Control panel is missing roles: {:?}", missing);
            return Err(ControlError::Configuration { missing });
        }
        let Some(frame) = frame else {
            return Err(ControlError::Configuration {
                missing: vec![ControlRole::Frame],
            });
        };

        let mut take = |role: ControlRole| {
            widgets
                .remove(&role)
                .ok_or_else(|| ControlError::Configuration {
                    missing: vec![role],
                })
        };

        let panel = Self {
            frame,
            controls: take(ControlRole::Controls)?,
            play: take(ControlRole::Play)?,
            stop: take(ControlRole::Stop)?,
            rewind: take(ControlRole::Rewind)?,
            fast_forward: take(ControlRole::FastForward)?,
            timer: take(ControlRole::Timer)?,
            timer_text: take(ControlRole::TimerText)?,
            timer_bar: take(ControlRole::TimerBar)?,
            mute: take(ControlRole::Mute)?,
            volume_up: take(ControlRole::VolumeUp)?,
            volume_down: take(ControlRole::VolumeDown)?,
            full_screen: take(ControlRole::FullScreen)?,
            speed: take(ControlRole::Speed)?,
            preview: take(ControlRole::Preview)?,
        };

        // Custom controls replace the native ones; the preview starts hidden
        panel.controls.set_visible(true);
        panel.preview.set_visible(false);

        debug!("Control panel bound with {} roles", ControlRole::ALL.len());
        Ok(panel)
    }
}
