use tracing::debug;

use super::PlayerController;
use crate::ui::bindings::Bounds;
use crate::utils::format_timecode;

/// Pointer position over the scrub bar, captured per event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubState {
    pub pointer_x: f64,
    pub bar_origin_x: f64,
    pub bar_width: f64,
}

impl ScrubState {
    pub fn new(pointer_x: f64, bar: Bounds) -> Self {
        Self {
            pointer_x,
            bar_origin_x: bar.x,
            bar_width: bar.width,
        }
    }

    /// Map the pointer linearly onto `[0, duration]`. Pointers outside the
    /// bar map outside that range. `None` when the duration is unknown or
    /// the bar has no width.
    pub fn target_time(&self, duration: Option<f64>) -> Option<f64> {
        let duration = duration.filter(|d| d.is_finite())?;
        if !(self.bar_width > 0.0) {
            return None;
        }
        Some(duration * (self.pointer_x - self.bar_origin_x) / self.bar_width)
    }
}

impl PlayerController {
    async fn scrub_target(&self, pointer_x: f64) -> Option<f64> {
        let scrub = ScrubState::new(pointer_x, self.panel.timer.bounds());
        scrub.target_time(self.media.duration().await)
    }

    /// Seek to the time under a click on the scrub bar
    pub(super) async fn seek_absolute(&mut self, pointer_x: f64) {
        let Some(target) = self.scrub_target(pointer_x).await else {
            debug!("Ignoring scrub click, no duration or bar width");
            return;
        };

        debug!("Scrub seek to {:.2}s", target);
        let result = self.media.set_current_time(target).await;
        self.report("seek", result);
        self.render_time().await;
    }

    /// Point the preview instance at the main element's source, reloading
    /// it when the two differ. Left alone while the main element is empty.
    pub(super) async fn sync_preview_source(&mut self) {
        let Some(source) = self.media.source().await else {
            return;
        };
        if self.preview.source().await.as_deref() == Some(source.as_str()) {
            return;
        }

        debug!("Loading {} into the preview", source);
        let result = self.preview.set_source(Some(&source)).await;
        self.report("set preview source", result);
        let result = self.preview.load().await;
        self.report("load preview", result);
    }

    /// Show the preview instance at the time under the pointer
    pub(super) async fn render_scrub_preview(&mut self, pointer_x: f64) {
        let Some(target) = self.scrub_target(pointer_x).await else {
            return;
        };
        self.sync_preview_source().await;

        let result = self.preview.set_current_time(target).await;
        self.report("preview seek", result);
        self.panel.preview.set_text(&format_timecode(target));
        self.panel.preview.set_visible(true);
        self.preview_time = Some(target);
    }

    pub(super) fn hide_scrub_preview(&mut self) {
        self.panel.preview.set_visible(false);
        self.preview_time = None;
    }
}
