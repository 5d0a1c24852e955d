use async_trait::async_trait;
use playdeck::player::Icon;
use playdeck::ui::bindings::{Bounds, ControlRole, ControlWidget, FrameHost, WidgetLookup};
use playdeck::{MediaElement, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BAR_X: f64 = 20.0;
pub const BAR_WIDTH: f64 = 300.0;

#[derive(Debug, Clone)]
pub struct FakeMediaState {
    pub source: Option<String>,
    pub paused: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    pub muted: bool,
    pub rate: f64,
    pub seeks: Vec<f64>,
}

impl Default for FakeMediaState {
    fn default() -> Self {
        Self {
            source: None,
            paused: true,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            muted: false,
            rate: 1.0,
            seeks: Vec::new(),
        }
    }
}

/// Media engine whose position only moves when told to.
#[derive(Debug, Default)]
pub struct FakeMedia {
    state: Mutex<FakeMediaState>,
    /// Duration the engine reports after loading any source
    clip_duration: f64,
}

impl FakeMedia {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            clip_duration: 90.0,
            ..Default::default()
        })
    }

    pub fn with_clip(duration: f64, position: f64) -> Arc<Self> {
        let media = Self {
            clip_duration: duration,
            ..Default::default()
        };
        {
            let mut state = media.state.lock().unwrap();
            state.source = Some("file:///clips/sample.webm".to_string());
            state.duration = Some(duration);
            state.current_time = position;
        }
        Arc::new(media)
    }

    pub fn state(&self) -> FakeMediaState {
        self.state.lock().unwrap().clone()
    }

    pub fn set_position(&self, seconds: f64) {
        self.state.lock().unwrap().current_time = seconds;
    }
}

#[async_trait]
impl MediaElement for FakeMedia {
    async fn source(&self) -> Option<String> {
        self.state().source
    }

    async fn set_source(&self, url: Option<&str>) -> Result<()> {
        self.state.lock().unwrap().source = url.map(str::to_string);
        Ok(())
    }

    async fn load(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.current_time = 0.0;
        state.paused = true;
        state.duration = state.source.as_ref().map(|_| self.clip_duration);
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        self.state.lock().unwrap().paused = false;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.state.lock().unwrap().paused = true;
        Ok(())
    }

    async fn is_paused(&self) -> bool {
        self.state().paused
    }

    async fn current_time(&self) -> f64 {
        self.state().current_time
    }

    async fn set_current_time(&self, seconds: f64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.current_time = seconds;
        state.seeks.push(seconds);
        Ok(())
    }

    async fn duration(&self) -> Option<f64> {
        self.state().duration
    }

    async fn volume(&self) -> f64 {
        self.state().volume
    }

    async fn set_volume(&self, volume: f64) -> Result<()> {
        self.state.lock().unwrap().volume = volume;
        Ok(())
    }

    async fn is_muted(&self) -> bool {
        self.state().muted
    }

    async fn set_muted(&self, muted: bool) -> Result<()> {
        self.state.lock().unwrap().muted = muted;
        Ok(())
    }

    async fn playback_rate(&self) -> f64 {
        self.state().rate
    }

    async fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.state.lock().unwrap().rate = rate;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeWidget {
    pub icon: Mutex<Option<Icon>>,
    pub active: Mutex<bool>,
    pub text: Mutex<String>,
    pub width: Mutex<f64>,
    pub visible: Mutex<bool>,
    bounds: Bounds,
}

impl ControlWidget for FakeWidget {
    fn set_icon(&self, icon: Icon) {
        *self.icon.lock().unwrap() = Some(icon);
    }

    fn set_active(&self, active: bool) {
        *self.active.lock().unwrap() = active;
    }

    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }

    fn set_width(&self, width: f64) {
        *self.width.lock().unwrap() = width;
    }

    fn set_visible(&self, visible: bool) {
        *self.visible.lock().unwrap() = visible;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[derive(Debug, Default)]
pub struct FakeFrame {
    pub fullscreen: Mutex<bool>,
    pub cursor_hidden: Mutex<bool>,
}

impl FrameHost for FakeFrame {
    fn is_fullscreen(&self) -> bool {
        *self.fullscreen.lock().unwrap()
    }

    fn request_fullscreen(&self) -> Result<()> {
        *self.fullscreen.lock().unwrap() = true;
        Ok(())
    }

    fn exit_fullscreen(&self) -> Result<()> {
        *self.fullscreen.lock().unwrap() = false;
        Ok(())
    }

    fn set_cursor_visible(&self, visible: bool) {
        *self.cursor_hidden.lock().unwrap() = !visible;
    }
}

/// Panel where every selector resolves, with a scrub bar at
/// `BAR_X..BAR_X + BAR_WIDTH`.
pub struct FakePanel {
    widgets: HashMap<&'static str, Arc<FakeWidget>>,
    pub frame: Arc<FakeFrame>,
}

impl FakePanel {
    pub fn new() -> Self {
        let widgets = ControlRole::ALL
            .into_iter()
            .filter(|role| *role != ControlRole::Frame)
            .map(|role| {
                let mut widget = FakeWidget::default();
                if role == ControlRole::Timer {
                    widget.bounds = Bounds {
                        x: BAR_X,
                        width: BAR_WIDTH,
                    };
                }
                (role.selector(), Arc::new(widget))
            })
            .collect();
        Self {
            widgets,
            frame: Arc::new(FakeFrame::default()),
        }
    }

    pub fn widget(&self, role: ControlRole) -> Arc<FakeWidget> {
        self.widgets[role.selector()].clone()
    }

    pub fn bar_width(&self) -> f64 {
        *self.widget(ControlRole::TimerBar).width.lock().unwrap()
    }
}

impl WidgetLookup for FakePanel {
    fn find(&self, selector: &str) -> Option<Arc<dyn ControlWidget>> {
        self.widgets
            .get(selector)
            .map(|widget| widget.clone() as Arc<dyn ControlWidget>)
    }

    fn frame(&self) -> Option<Arc<dyn FrameHost>> {
        Some(self.frame.clone() as Arc<dyn FrameHost>)
    }
}
