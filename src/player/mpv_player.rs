use async_trait::async_trait;
use libmpv2::Mpv;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use super::traits::{MediaElement, MediaEvent};
use crate::ui::player_controls::PlayerHandle;
use crate::utils::{ControlError, Result};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A media element backed by an embedded mpv instance.
///
/// mpv has no notion of an assigned-but-unloaded source, so the source is
/// kept here and handed to `loadfile` on [`MediaElement::load`].
pub struct MpvMediaElement {
    mpv: Mutex<Mpv>,
    source: Mutex<Option<String>>,
}

impl std::fmt::Debug for MpvMediaElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpvMediaElement")
            .field("source", &self.source.lock().ok().and_then(|s| s.clone()))
            .finish()
    }
}

impl MpvMediaElement {
    /// Create the playing instance, with video and audio output.
    pub fn new() -> Result<Self> {
        Self::create(false)
    }

    /// Create an instance with no outputs, used for scrub previews.
    pub fn headless() -> Result<Self> {
        Self::create(true)
    }

    fn create(headless: bool) -> Result<Self> {
        info!("Creating MPV instance (headless: {})", headless);
        let mpv = Mpv::new().map_err(|e| media_error("create MPV instance", e))?;

        // Stay on the last frame at the end so eof-reached can be observed
        mpv.set_property("keep-open", "yes")
            .map_err(|e| media_error("set keep-open", e))?;
        mpv.set_property("idle", "yes")
            .map_err(|e| media_error("set idle", e))?;
        mpv.set_property("pause", true)
            .map_err(|e| media_error("set pause", e))?;
        if headless {
            mpv.set_property("vo", "null")
                .map_err(|e| media_error("set vo=null", e))?;
            mpv.set_property("ao", "null")
                .map_err(|e| media_error("set ao=null", e))?;
        }

        if let Ok(version) = mpv.get_property::<String>("mpv-version") {
            debug!("MPV version: {}", version);
        }

        Ok(Self {
            mpv: Mutex::new(mpv),
            source: Mutex::new(None),
        })
    }

    fn mpv(&self) -> Result<MutexGuard<'_, Mpv>> {
        self.mpv
            .lock()
            .map_err(|_| ControlError::Media("MPV instance lock poisoned".to_string()))
    }

    fn property_f64(&self, name: &str) -> Option<f64> {
        self.mpv().ok()?.get_property::<f64>(name).ok()
    }

    fn property_bool(&self, name: &str) -> Option<bool> {
        self.mpv().ok()?.get_property::<bool>(name).ok()
    }
}

fn media_error(action: &str, e: libmpv2::Error) -> ControlError {
    ControlError::Media(format!("Failed to {}: {:?}", action, e))
}

#[async_trait]
impl MediaElement for MpvMediaElement {
    async fn source(&self) -> Option<String> {
        self.source.lock().ok()?.clone()
    }

    async fn set_source(&self, url: Option<&str>) -> Result<()> {
        let mut source = self
            .source
            .lock()
            .map_err(|_| ControlError::Media("source lock poisoned".to_string()))?;
        *source = url.map(str::to_string);
        Ok(())
    }

    async fn load(&self) -> Result<()> {
        let source = self.source().await;
        let mpv = self.mpv()?;
        mpv.set_property("pause", true)
            .map_err(|e| media_error("set pause=true", e))?;

        match source {
            Some(url) => {
                info!("Loading media: {}", url);
                mpv.command("loadfile", &[&url, "replace"])
                    .map_err(|e| media_error("load media", e))?;
            }
            None => {
                debug!("Unloading media");
                mpv.command("stop", &[])
                    .map_err(|e| media_error("stop", e))?;
            }
        }
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        debug!("Starting playback");
        self.mpv()?
            .set_property("pause", false)
            .map_err(|e| media_error("set pause=false", e))
    }

    async fn pause(&self) -> Result<()> {
        debug!("Pausing playback");
        self.mpv()?
            .set_property("pause", true)
            .map_err(|e| media_error("set pause=true", e))
    }

    async fn is_paused(&self) -> bool {
        self.property_bool("pause").unwrap_or(true)
    }

    async fn current_time(&self) -> f64 {
        self.property_f64("time-pos").unwrap_or(0.0)
    }

    async fn set_current_time(&self, seconds: f64) -> Result<()> {
        // Negative absolute seeks count from the end in mpv
        let position = seconds.max(0.0);
        trace!("Seeking to {:.2}s", position);
        self.mpv()?
            .command("seek", &[&position.to_string(), "absolute"])
            .map_err(|e| media_error("seek", e))
    }

    async fn duration(&self) -> Option<f64> {
        self.property_f64("duration").filter(|d| d.is_finite())
    }

    async fn volume(&self) -> f64 {
        // MPV reports volume in the 0-100 range
        self.property_f64("volume")
            .map(|v| (v / 100.0).clamp(0.0, 1.0))
            .unwrap_or(1.0)
    }

    async fn set_volume(&self, volume: f64) -> Result<()> {
        let mpv_volume = (volume * 100.0).clamp(0.0, 100.0);
        self.mpv()?
            .set_property("volume", mpv_volume)
            .map_err(|e| media_error("set volume", e))
    }

    async fn is_muted(&self) -> bool {
        self.property_bool("mute").unwrap_or(false)
    }

    async fn set_muted(&self, muted: bool) -> Result<()> {
        self.mpv()?
            .set_property("mute", muted)
            .map_err(|e| media_error("set mute", e))
    }

    async fn playback_rate(&self) -> f64 {
        self.property_f64("speed").unwrap_or(1.0)
    }

    async fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.mpv()?
            .set_property("speed", rate)
            .map_err(|e| media_error("set speed", e))
    }
}

/// Poll `element` and forward position, metadata and end-of-file changes
/// to the controller as media events. Ends once the controller is gone.
pub fn spawn_event_pump(element: Arc<MpvMediaElement>, handle: PlayerHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(EVENT_POLL_INTERVAL);
        let mut last_position: Option<f64> = None;
        let mut had_duration = false;
        let mut at_eof = false;

        loop {
            ticker.tick().await;

            let mut events = Vec::new();
            let has_duration = element.property_f64("duration").is_some();
            if has_duration && !had_duration {
                events.push(MediaEvent::LoadedMetadata);
            }
            had_duration = has_duration;

            let position = element.property_f64("time-pos");
            if position.is_some() && position != last_position {
                events.push(MediaEvent::TimeUpdate);
            }
            last_position = position;

            let eof = element.property_bool("eof-reached").unwrap_or(false);
            if eof && !at_eof {
                events.push(MediaEvent::Ended);
            }
            at_eof = eof;

            for event in events {
                if let Err(e) = handle.media_event(event) {
                    debug!("Stopping MPV event pump: {}", e);
                    return;
                }
            }

            if element.mpv().is_err() {
                warn!("MPV instance unavailable, stopping event pump");
                let _ = handle.media_event(MediaEvent::Error(
                    "MPV instance became unavailable".to_string(),
                ));
                return;
            }
        }
    })
}
