use tracing::debug;

use super::PlayerController;
use crate::player::types::Icon;

/// Icon for the mute button: muted, or one of two volume levels split at
/// `threshold`.
pub fn volume_icon(volume: f64, muted: bool, threshold: f64) -> Icon {
    if muted || volume <= 0.0 {
        Icon::VolumeMuted
    } else if volume >= threshold {
        Icon::VolumeHigh
    } else {
        Icon::VolumeLow
    }
}

impl PlayerController {
    pub(super) async fn refresh_volume_icon(&mut self) {
        let volume = self.media.volume().await;
        let muted = self.media.is_muted().await;
        self.volume_icon = volume_icon(volume, muted, self.config.playback.volume_icon_threshold);
        self.panel.mute.set_icon(self.volume_icon);
    }

    pub(super) async fn toggle_mute(&mut self) {
        let muted = !self.media.is_muted().await;
        debug!("Setting muted to {}", muted);
        let result = self.media.set_muted(muted).await;
        self.report("set muted", result);
        self.refresh_volume_icon().await;
    }

    /// Step the volume by `delta`, capped to `[0, 1]`. Mute is left alone.
    pub(super) async fn adjust_volume(&mut self, delta: f64) {
        let current = self.media.volume().await;
        // Round to the slider's 1% resolution so repeated steps land exactly
        let volume = ((current + delta).clamp(0.0, 1.0) * 100.0).round() / 100.0;
        debug!("Volume {} -> {}", current, volume);
        let result = self.media.set_volume(volume).await;
        self.report("set volume", result);
        self.refresh_volume_icon().await;
    }
}
