#![cfg(test)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::player::traits::MediaElement;
use crate::player::types::Icon;
use crate::ui::bindings::{Bounds, ControlRole, ControlWidget, FrameHost, WidgetLookup};
use crate::utils::{ControlError, Result};

/// Scrub bar geometry used by every mock panel
pub const TIMER_X: f64 = 100.0;
pub const TIMER_WIDTH: f64 = 400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MockMediaState {
    pub source: Option<String>,
    pub paused: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    /// Duration reported once a source has been loaded
    pub metadata_duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub playback_rate: f64,
    pub loads: u32,
    pub seeks: Vec<f64>,
    pub fail_play: bool,
}

impl Default for MockMediaState {
    fn default() -> Self {
        Self {
            source: None,
            paused: true,
            current_time: 0.0,
            duration: None,
            metadata_duration: 120.0,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
            loads: 0,
            seeks: Vec::new(),
            fail_play: false,
        }
    }
}

/// Media element that records every mutation and loads instantly.
#[derive(Debug, Default)]
pub struct MockMedia {
    state: Mutex<MockMediaState>,
}

impl MockMedia {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A media element that already has a loaded source
    pub fn loaded(duration: f64) -> Arc<Self> {
        let media = Self::default();
        media.update(|s| {
            s.source = Some("file:///media/clip.mp4".to_string());
            s.metadata_duration = duration;
            s.duration = Some(duration);
        });
        Arc::new(media)
    }

    pub fn state(&self) -> MockMediaState {
        self.state.lock().unwrap().clone()
    }

    pub fn update<F: FnOnce(&mut MockMediaState)>(&self, updater: F) {
        updater(&mut self.state.lock().unwrap());
    }
}

#[async_trait]
impl MediaElement for MockMedia {
    async fn source(&self) -> Option<String> {
        self.state().source
    }

    async fn set_source(&self, url: Option<&str>) -> Result<()> {
        self.update(|s| s.source = url.map(str::to_string));
        Ok(())
    }

    async fn load(&self) -> Result<()> {
        self.update(|s| {
            s.loads += 1;
            s.current_time = 0.0;
            s.paused = true;
            s.duration = s.source.as_ref().map(|_| s.metadata_duration);
        });
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        if self.state().fail_play {
            return Err(ControlError::Media("play() was rejected".to_string()));
        }
        self.update(|s| s.paused = false);
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.update(|s| s.paused = true);
        Ok(())
    }

    async fn is_paused(&self) -> bool {
        self.state().paused
    }

    async fn current_time(&self) -> f64 {
        self.state().current_time
    }

    async fn set_current_time(&self, seconds: f64) -> Result<()> {
        self.update(|s| {
            s.current_time = seconds;
            s.seeks.push(seconds);
        });
        Ok(())
    }

    async fn duration(&self) -> Option<f64> {
        self.state().duration
    }

    async fn volume(&self) -> f64 {
        self.state().volume
    }

    async fn set_volume(&self, volume: f64) -> Result<()> {
        self.update(|s| s.volume = volume);
        Ok(())
    }

    async fn is_muted(&self) -> bool {
        self.state().muted
    }

    async fn set_muted(&self, muted: bool) -> Result<()> {
        self.update(|s| s.muted = muted);
        Ok(())
    }

    async fn playback_rate(&self) -> f64 {
        self.state().playback_rate
    }

    async fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.update(|s| s.playback_rate = rate);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub icon: Option<Icon>,
    pub active: bool,
    pub text: String,
    pub width: f64,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct MockWidget {
    state: Mutex<WidgetState>,
    bounds: Mutex<Bounds>,
}

impl MockWidget {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_bounds(x: f64, width: f64) -> Arc<Self> {
        let widget = Self::default();
        *widget.bounds.lock().unwrap() = Bounds { x, width };
        Arc::new(widget)
    }

    pub fn state(&self) -> WidgetState {
        self.state.lock().unwrap().clone()
    }
}

impl ControlWidget for MockWidget {
    fn set_icon(&self, icon: Icon) {
        self.state.lock().unwrap().icon = Some(icon);
    }

    fn set_active(&self, active: bool) {
        self.state.lock().unwrap().active = active;
    }

    fn set_text(&self, text: &str) {
        self.state.lock().unwrap().text = text.to_string();
    }

    fn set_width(&self, width: f64) {
        self.state.lock().unwrap().width = width;
    }

    fn set_visible(&self, visible: bool) {
        self.state.lock().unwrap().visible = visible;
    }

    fn bounds(&self) -> Bounds {
        *self.bounds.lock().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub fullscreen: bool,
    pub cursor_visible: bool,
    pub requests: u32,
    pub exits: u32,
    pub fail_requests: bool,
}

/// Frame that enters fullscreen synchronously. The change notification is
/// left to the test, as a real host would deliver it asynchronously.
#[derive(Debug)]
pub struct MockFrame {
    state: Mutex<FrameState>,
}

impl MockFrame {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FrameState {
                fullscreen: false,
                cursor_visible: true,
                requests: 0,
                exits: 0,
                fail_requests: false,
            }),
        })
    }

    pub fn state(&self) -> FrameState {
        self.state.lock().unwrap().clone()
    }

    pub fn fail_requests(&self) {
        self.state.lock().unwrap().fail_requests = true;
    }
}

impl FrameHost for MockFrame {
    fn is_fullscreen(&self) -> bool {
        self.state.lock().unwrap().fullscreen
    }

    fn request_fullscreen(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_requests {
            return Err(ControlError::Fullscreen("requests are blocked".to_string()));
        }
        state.requests += 1;
        state.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.exits += 1;
        state.fullscreen = false;
        Ok(())
    }

    fn set_cursor_visible(&self, visible: bool) {
        self.state.lock().unwrap().cursor_visible = visible;
    }
}

pub struct MockLookup {
    widgets: HashMap<ControlRole, Arc<MockWidget>>,
    frame: Option<Arc<MockFrame>>,
}

impl MockLookup {
    /// A lookup that resolves every role
    pub fn complete() -> Self {
        let widgets = ControlRole::ALL
            .into_iter()
            .filter(|role| *role != ControlRole::Frame)
            .map(|role| {
                let widget = if role == ControlRole::Timer {
                    MockWidget::with_bounds(TIMER_X, TIMER_WIDTH)
                } else {
                    MockWidget::new()
                };
                (role, widget)
            })
            .collect();

        Self {
            widgets,
            frame: Some(MockFrame::new()),
        }
    }

    pub fn without(mut self, role: ControlRole) -> Self {
        if role == ControlRole::Frame {
            self.frame = None;
        } else {
            self.widgets.remove(&role);
        }
        self
    }

    pub fn widget(&self, role: ControlRole) -> Arc<MockWidget> {
        self.widgets[&role].clone()
    }

    pub fn mock_frame(&self) -> Arc<MockFrame> {
        self.frame.clone().unwrap()
    }
}

impl WidgetLookup for MockLookup {
    fn find(&self, selector: &str) -> Option<Arc<dyn ControlWidget>> {
        let role = ControlRole::ALL
            .into_iter()
            .find(|role| role.selector() == selector)?;
        self.widgets
            .get(&role)
            .map(|widget| widget.clone() as Arc<dyn ControlWidget>)
    }

    fn frame(&self) -> Option<Arc<dyn FrameHost>> {
        self.frame
            .as_ref()
            .map(|frame| frame.clone() as Arc<dyn FrameHost>)
    }
}
