use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::player::traits::{MediaElement, MediaEvent};
use crate::player::types::{ControllerSnapshot, Icon, PlaybackRate, PlaybackState, WindDirection};
use crate::ui::bindings::{ControlPanel, WidgetLookup};
use crate::utils::{ControlError, Result, format_timecode};

mod controls_visibility;
mod handle;
mod input;
mod keyboard;
mod seek_bar;
mod volume;
mod wind;

use controls_visibility::ChromeState;
pub use handle::PlayerHandle;
pub use input::{ControlInput, Key};
pub use seek_bar::ScrubState;
pub use volume::volume_icon;
use wind::WindState;

/// Errors queued for the front end before new ones are dropped
const ERROR_BUFFER: usize = 32;

/// Mediates control-panel input into calls against one media element and
/// keeps the panel consistent with the element's state.
///
/// All inputs, including timer expiries and engine notifications, arrive
/// through one channel and are handled in order by [`PlayerController::run`].
pub struct PlayerController {
    media: Arc<dyn MediaElement>,
    /// Muted, hidden instance used to render scrub previews
    preview: Arc<dyn MediaElement>,
    panel: ControlPanel,
    config: Config,
    receiver: mpsc::UnboundedReceiver<ControlInput>,
    // Weak so that dropping every handle ends the loop
    sender: mpsc::WeakUnboundedSender<ControlInput>,
    error_sender: mpsc::Sender<ControlError>,
    wind: WindState,
    chrome: ChromeState,
    play_icon: Icon,
    volume_icon: Icon,
    speed_label: &'static str,
    timer_text: String,
    preview_time: Option<f64>,
}

impl std::fmt::Debug for PlayerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerController")
            .field("wind", &self.wind.direction())
            .field("play_icon", &self.play_icon)
            .field("volume_icon", &self.volume_icon)
            .field("timer_text", &self.timer_text)
            .finish()
    }
}

impl PlayerController {
    /// Bind the control panel and create the controller with its handle.
    ///
    /// Fails with [`ControlError::Configuration`] when any control role is
    /// missing from `lookup`, and with [`ControlError::InvalidConfig`] when
    /// `config` does not validate.
    pub fn new(
        media: Arc<dyn MediaElement>,
        preview: Arc<dyn MediaElement>,
        lookup: &dyn WidgetLookup,
        config: Config,
    ) -> Result<(PlayerHandle, PlayerController)> {
        config.validate()?;
        let panel = ControlPanel::bind(lookup)?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let (error_tx, error_rx) = mpsc::channel(ERROR_BUFFER);

        let controller = PlayerController {
            media,
            preview,
            panel,
            config,
            receiver,
            sender: sender.downgrade(),
            error_sender: error_tx,
            wind: WindState::default(),
            chrome: ChromeState::default(),
            play_icon: Icon::Play,
            volume_icon: Icon::VolumeHigh,
            speed_label: PlaybackRate::Normal.label(),
            timer_text: format_timecode(0.0),
            preview_time: None,
        };
        let handle = PlayerHandle::new(sender, error_rx);

        Ok((handle, controller))
    }

    /// Run the controller event loop
    pub async fn run(mut self) {
        debug!("PlayerController event loop started");
        self.prepare().await;

        while let Some(input) = self.receiver.recv().await {
            if matches!(input, ControlInput::Shutdown) {
                info!("PlayerController shutting down");
                break;
            }
            self.handle_input(input).await;
        }

        self.clear_wind();
        self.chrome.cancel_timers();
        debug!("PlayerController event loop terminated");
    }

    /// Bring the panel in line with the element before the first input.
    async fn prepare(&mut self) {
        let result = self.preview.set_muted(true).await;
        self.report("mute preview", result);

        self.play_icon = if self.media.is_paused().await {
            Icon::Play
        } else {
            Icon::Pause
        };
        self.panel.play.set_icon(self.play_icon);
        self.panel.full_screen.set_icon(Icon::Expand);
        self.sync_preview_source().await;
        self.refresh_volume_icon().await;
        self.refresh_speed_label().await;
        self.render_time().await;
    }

    async fn handle_input(&mut self, input: ControlInput) {
        trace!("Handling {:?}", input);
        match input {
            ControlInput::PlayPause => self.toggle_play_pause().await,
            ControlInput::Stop => self.stop().await,
            ControlInput::Rewind => self.skip(WindDirection::Backward).await,
            ControlInput::FastForward => self.skip(WindDirection::Forward).await,
            ControlInput::ScrubClick { x } => self.seek_absolute(x).await,
            ControlInput::ScrubHover { x } => self.render_scrub_preview(x).await,
            ControlInput::ScrubLeave => self.hide_scrub_preview(),
            ControlInput::ToggleMute => self.toggle_mute().await,
            ControlInput::VolumeUp => self.adjust_volume(self.config.playback.volume_step).await,
            ControlInput::VolumeDown => {
                self.adjust_volume(-self.config.playback.volume_step).await
            }
            ControlInput::ToggleFullscreen => self.toggle_fullscreen(),
            ControlInput::FullscreenChanged(fullscreen) => self.fullscreen_changed(fullscreen),
            ControlInput::ToggleSpeed => self.toggle_playback_rate().await,
            ControlInput::Key(key) => self.handle_key(key).await,
            ControlInput::PointerMoved => self.pointer_moved(),
            ControlInput::Media(event) => self.handle_media_event(event).await,
            ControlInput::WindTick { generation } => self.wind_tick(generation).await,
            ControlInput::HideCursor { generation } => self.hide_cursor(generation),
            ControlInput::HideControls { generation } => self.hide_controls(generation),
            ControlInput::Snapshot { respond_to } => {
                let snapshot = self.snapshot().await;
                let _ = respond_to.send(snapshot);
            }
            ControlInput::Shutdown => {}
        }
    }

    /// Play when paused, pause when playing. Assigns the default source
    /// first if the element has none. Any wind in progress is cancelled.
    async fn toggle_play_pause(&mut self) {
        self.clear_wind();

        if self.media.source().await.is_none() {
            let source = self.config.playback.default_source.clone();
            info!("No media source set, loading {}", source);
            let result = self.media.set_source(Some(&source)).await;
            self.report("set source", result);
            let result = self.media.load().await;
            self.report("load", result);
            self.sync_preview_source().await;
        }

        if self.media.is_paused().await {
            let result = self.media.play().await;
            if self.report("play", result).is_some() {
                self.set_play_icon(Icon::Pause);
            }
        } else {
            let result = self.media.pause().await;
            self.report("pause", result);
            self.set_play_icon(Icon::Play);
        }
    }

    /// Halt winding and reset the element by clearing its source.
    async fn stop(&mut self) {
        debug!("Stopping playback");
        self.clear_wind();

        let result = self.media.pause().await;
        self.report("pause", result);
        let result = self.media.set_source(None).await;
        self.report("clear source", result);
        let result = self.media.load().await;
        self.report("load", result);

        self.set_play_icon(Icon::Play);
        self.render_time().await;
    }

    /// Switch between 1x and 2x.
    async fn toggle_playback_rate(&mut self) {
        let current = self.media.playback_rate().await;
        let next = PlaybackRate::toggled_from(current);
        debug!("Playback rate {} -> {}", current, next.as_f64());

        let result = self.media.set_playback_rate(next.as_f64()).await;
        self.report("set playback rate", result);
        self.refresh_speed_label().await;
    }

    async fn refresh_speed_label(&mut self) {
        self.speed_label = PlaybackRate::button_label(self.media.playback_rate().await);
        self.panel.speed.set_text(self.speed_label);
    }

    async fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate | MediaEvent::LoadedMetadata => self.render_time().await,
            MediaEvent::Ended => self.stop().await,
            MediaEvent::Error(message) => {
                warn!("Media element reported an error: {}", message);
                self.forward_error(ControlError::Media(message));
            }
        }
    }

    /// Update the timecode and progress bar from the element's position.
    async fn render_time(&mut self) {
        let current = self.media.current_time().await;
        let duration = self.media.duration().await;

        self.timer_text = format_timecode(current);
        self.panel.timer_text.set_text(&self.timer_text);

        let ratio = match duration {
            Some(duration) if duration.is_finite() && duration > 0.0 && current.is_finite() => {
                (current / duration).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };
        self.panel
            .timer_bar
            .set_width(self.panel.timer.bounds().width * ratio);
    }

    fn set_play_icon(&mut self, icon: Icon) {
        self.play_icon = icon;
        self.panel.play.set_icon(icon);
    }

    /// Log a failed call and forward it to the error channel.
    fn report<T>(&self, action: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{} failed: {}", action, e);
                self.forward_error(e);
                None
            }
        }
    }

    /// Queue an error for the front end. Dropped when nobody drains the
    /// receiver and the buffer is full, or when the receiver is gone.
    fn forward_error(&self, error: ControlError) {
        match self.error_sender.try_send(error) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(error)) => {
                trace!("Error buffer full, dropping {}", error);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }

    fn scheduler(&self) -> Option<mpsc::UnboundedSender<ControlInput>> {
        self.sender.upgrade()
    }

    async fn snapshot(&self) -> ControllerSnapshot {
        let playback = PlaybackState {
            paused: self.media.is_paused().await,
            current_time: self.media.current_time().await,
            duration: self.media.duration().await,
            volume: self.media.volume().await,
            muted: self.media.is_muted().await,
            playback_rate: self.media.playback_rate().await,
        };

        ControllerSnapshot {
            playback,
            source: self.media.source().await,
            wind: self.wind.direction(),
            wind_task_active: self.wind.task_active(),
            play_icon: self.play_icon,
            volume_icon: self.volume_icon,
            fullscreen_icon: self.chrome.fullscreen_icon(),
            fullscreen: self.chrome.fullscreen,
            cursor_visible: self.chrome.cursor_visible,
            controls_displayed: self.chrome.controls_displayed,
            preview_time: self.preview_time,
            speed_label: self.speed_label.to_string(),
            timer_text: self.timer_text.clone(),
        }
    }
}
