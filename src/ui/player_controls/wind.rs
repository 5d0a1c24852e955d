use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::{ControlInput, PlayerController};
use crate::player::types::{Icon, WindDirection};
use crate::ui::bindings::ControlWidget;
use crate::utils::ScheduledTask;

/// Continuous wind state: idle, or winding in one direction with exactly
/// one repeating task behind it.
#[derive(Debug, Default)]
pub(super) struct WindState {
    direction: Option<WindDirection>,
    task: Option<ScheduledTask>,
    /// Bumped on every start and cancel so ticks queued by an old task are
    /// recognised and dropped
    generation: u64,
}

impl WindState {
    pub(super) fn direction(&self) -> Option<WindDirection> {
        self.direction
    }

    pub(super) fn task_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl PlayerController {
    /// Cancel any wind and clear both highlights.
    pub(super) fn clear_wind(&mut self) {
        if let Some(direction) = self.wind.direction.take() {
            debug!("Cancelling {:?} wind", direction);
        }
        if let Some(task) = self.wind.task.take() {
            task.cancel();
        }
        self.wind.generation += 1;
        self.panel.rewind.set_active(false);
        self.panel.fast_forward.set_active(false);
    }

    /// Toggle a continuous wind in `direction`. Pressing the active
    /// direction again cancels it and resumes playback; pressing the other
    /// direction switches over.
    pub(super) async fn skip(&mut self, direction: WindDirection) {
        let resume = self.wind.direction == Some(direction);
        self.clear_wind();

        if resume {
            debug!("{:?} wind toggled off, resuming playback", direction);
            let result = self.media.play().await;
            if self.report("play", result).is_some() {
                self.set_play_icon(Icon::Pause);
            }
            return;
        }

        let Some(sender) = self.scheduler() else {
            warn!("Controller has no live handles, not starting wind");
            return;
        };

        let result = self.media.pause().await;
        self.report("pause", result);
        self.set_play_icon(Icon::Play);
        self.wind_button(direction).set_active(true);

        let generation = self.wind.generation;
        let period = self.config.playback.wind_interval();
        self.wind.task = Some(ScheduledTask::every(period, sender, move || {
            ControlInput::WindTick { generation }
        }));
        self.wind.direction = Some(direction);
        debug!("Started {:?} wind every {:?}", direction, period);
    }

    /// One wind step. Reaching the boundary stops playback instead of
    /// clamping.
    pub(super) async fn wind_tick(&mut self, generation: u64) {
        let Some(direction) = self.wind.direction else {
            trace!("Wind tick while idle, ignoring");
            return;
        };
        if generation != self.wind.generation {
            trace!("Stale wind tick {} (current {})", generation, self.wind.generation);
            return;
        }

        let step = self.config.playback.wind_step_secs;
        let current = self.media.current_time().await;
        let at_boundary = match direction {
            WindDirection::Backward => current <= step,
            // Nothing to wind through before metadata arrives
            WindDirection::Forward => match self.media.duration().await {
                Some(duration) => current >= duration - step,
                None => true,
            },
        };

        if at_boundary {
            debug!("{:?} wind reached the boundary at {}s", direction, current);
            self.stop().await;
            return;
        }

        let target = current + direction.sign() * step;
        trace!("Wind step {} -> {}", current, target);
        let result = self.media.set_current_time(target).await;
        self.report("wind seek", result);
        self.render_time().await;
    }

    fn wind_button(&self, direction: WindDirection) -> &Arc<dyn ControlWidget> {
        match direction {
            WindDirection::Forward => &self.panel.fast_forward,
            WindDirection::Backward => &self.panel.rewind,
        }
    }
}
