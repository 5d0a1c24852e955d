use tracing::{debug, trace};

use super::{ControlInput, PlayerController};
use crate::player::types::Icon;
use crate::utils::ScheduledTask;

/// Fullscreen, cursor and controls-strip visibility, each timer with its
/// own generation so late expiries are dropped.
#[derive(Debug)]
pub(super) struct ChromeState {
    pub(super) fullscreen: bool,
    pub(super) cursor_visible: bool,
    cursor_timer: Option<ScheduledTask>,
    cursor_generation: u64,
    pub(super) controls_displayed: bool,
    controls_timer: Option<ScheduledTask>,
    controls_generation: u64,
}

impl Default for ChromeState {
    fn default() -> Self {
        Self {
            fullscreen: false,
            cursor_visible: true,
            cursor_timer: None,
            cursor_generation: 0,
            controls_displayed: false,
            controls_timer: None,
            controls_generation: 0,
        }
    }
}

impl ChromeState {
    pub(super) fn fullscreen_icon(&self) -> Icon {
        if self.fullscreen {
            Icon::Compress
        } else {
            Icon::Expand
        }
    }

    pub(super) fn cancel_timers(&mut self) {
        self.cancel_cursor_timer();
        if let Some(timer) = self.controls_timer.take() {
            timer.cancel();
        }
        self.controls_generation += 1;
    }

    fn cancel_cursor_timer(&mut self) {
        if let Some(timer) = self.cursor_timer.take() {
            timer.cancel();
        }
        self.cursor_generation += 1;
    }
}

impl PlayerController {
    /// Ask the frame to enter or leave fullscreen. The icon follows once
    /// the host reports the change.
    pub(super) fn toggle_fullscreen(&mut self) {
        let result = if self.panel.frame.is_fullscreen() {
            debug!("Exiting fullscreen");
            self.panel.frame.exit_fullscreen()
        } else {
            debug!("Requesting fullscreen");
            self.panel.frame.request_fullscreen()
        };
        self.report("toggle fullscreen", result);
    }

    pub(super) fn fullscreen_changed(&mut self, fullscreen: bool) {
        debug!("Fullscreen changed to {}", fullscreen);
        self.chrome.fullscreen = fullscreen;
        self.panel.full_screen.set_icon(self.chrome.fullscreen_icon());

        if fullscreen {
            self.restart_cursor_autohide();
        } else {
            self.chrome.cancel_cursor_timer();
            self.set_cursor_visible(true);
        }
    }

    /// Reveal the controls for a while. In fullscreen the cursor comes back
    /// too and its autohide starts over.
    pub(super) fn pointer_moved(&mut self) {
        let Some(sender) = self.scheduler() else {
            return;
        };

        if let Some(timer) = self.chrome.controls_timer.take() {
            timer.cancel();
        }
        self.chrome.controls_generation += 1;
        let generation = self.chrome.controls_generation;
        self.chrome.controls_timer = Some(ScheduledTask::once(
            self.config.controls.controls_display(),
            sender,
            ControlInput::HideControls { generation },
        ));
        if !self.chrome.controls_displayed {
            trace!("Showing controls");
        }
        self.chrome.controls_displayed = true;
        self.panel.controls.set_active(true);

        if self.chrome.fullscreen {
            self.set_cursor_visible(true);
            self.restart_cursor_autohide();
        }
    }

    pub(super) fn hide_cursor(&mut self, generation: u64) {
        if generation != self.chrome.cursor_generation || !self.chrome.fullscreen {
            trace!("Ignoring stale cursor timer {}", generation);
            return;
        }
        self.chrome.cursor_timer = None;
        self.set_cursor_visible(false);
    }

    pub(super) fn hide_controls(&mut self, generation: u64) {
        if generation != self.chrome.controls_generation {
            trace!("Ignoring stale controls timer {}", generation);
            return;
        }
        self.chrome.controls_timer = None;
        self.chrome.controls_displayed = false;
        self.panel.controls.set_active(false);
    }

    fn restart_cursor_autohide(&mut self) {
        self.chrome.cancel_cursor_timer();
        let Some(sender) = self.scheduler() else {
            return;
        };
        let generation = self.chrome.cursor_generation;
        self.chrome.cursor_timer = Some(ScheduledTask::once(
            self.config.controls.cursor_autohide(),
            sender,
            ControlInput::HideCursor { generation },
        ));
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.chrome.cursor_visible = visible;
        self.panel.frame.set_cursor_visible(visible);
    }
}
