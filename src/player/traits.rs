// Playback engine seam. The controller only talks to the engine through
// this trait; concrete engines live next to it behind cargo features.

use async_trait::async_trait;

use crate::utils::Result;

/// Notifications a media engine raises while playing.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback position moved
    TimeUpdate,
    /// Playback reached the end of the media
    Ended,
    /// Duration and dimensions became known
    LoadedMetadata,
    /// The engine failed to load or decode the media
    Error(String),
}

#[async_trait]
pub trait MediaElement: Send + Sync {
    async fn source(&self) -> Option<String>;
    /// Assign or clear the media source. Takes effect on the next `load()`.
    async fn set_source(&self, url: Option<&str>) -> Result<()>;
    async fn load(&self) -> Result<()>;
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn is_paused(&self) -> bool;
    async fn current_time(&self) -> f64;
    /// Move the playback position. The controller does not clamp, so
    /// values outside `[0, duration]` reach the engine, which may clamp
    /// them to its own valid range.
    async fn set_current_time(&self, seconds: f64) -> Result<()>;
    /// Media duration in seconds, `None` until metadata has loaded.
    async fn duration(&self) -> Option<f64>;
    async fn volume(&self) -> f64;
    async fn set_volume(&self, volume: f64) -> Result<()>;
    async fn is_muted(&self) -> bool;
    async fn set_muted(&self, muted: bool) -> Result<()>;
    async fn playback_rate(&self) -> f64;
    async fn set_playback_rate(&self, rate: f64) -> Result<()>;
}
