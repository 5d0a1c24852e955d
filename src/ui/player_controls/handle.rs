use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

use super::input::{ControlInput, Key};
use crate::player::traits::MediaEvent;
use crate::player::types::ControllerSnapshot;
use crate::utils::{ControlError, Result};

/// Handle to send inputs to the player controller
pub struct PlayerHandle {
    sender: mpsc::UnboundedSender<ControlInput>,
    error_receiver: Arc<Mutex<Option<mpsc::Receiver<ControlError>>>>,
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("sender", &"<UnboundedSender>")
            .field("error_receiver", &"<Arc<Mutex<...>>>")
            .finish()
    }
}

impl Clone for PlayerHandle {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            error_receiver: self.error_receiver.clone(),
        }
    }
}

impl PlayerHandle {
    pub(super) fn new(
        sender: mpsc::UnboundedSender<ControlInput>,
        error_receiver: mpsc::Receiver<ControlError>,
    ) -> Self {
        Self {
            sender,
            error_receiver: Arc::new(Mutex::new(Some(error_receiver))),
        }
    }

    /// Take the error receiver (can only be done once). Media failures and
    /// engine error events arrive here; a bounded backlog is kept until
    /// then and later errors are dropped.
    pub fn take_error_receiver(&self) -> Option<mpsc::Receiver<ControlError>> {
        self.error_receiver.lock().ok()?.take()
    }

    pub fn send(&self, input: ControlInput) -> Result<()> {
        self.sender
            .send(input)
            .map_err(|_| ControlError::Disconnected)
    }

    pub fn play_pause(&self) -> Result<()> {
        self.send(ControlInput::PlayPause)
    }

    pub fn stop(&self) -> Result<()> {
        self.send(ControlInput::Stop)
    }

    pub fn rewind(&self) -> Result<()> {
        self.send(ControlInput::Rewind)
    }

    pub fn fast_forward(&self) -> Result<()> {
        self.send(ControlInput::FastForward)
    }

    /// Seek to the time under a click on the scrub bar
    pub fn scrub_click(&self, x: f64) -> Result<()> {
        self.send(ControlInput::ScrubClick { x })
    }

    /// Show the preview thumbnail for the time under the pointer
    pub fn scrub_hover(&self, x: f64) -> Result<()> {
        self.send(ControlInput::ScrubHover { x })
    }

    pub fn scrub_leave(&self) -> Result<()> {
        self.send(ControlInput::ScrubLeave)
    }

    pub fn toggle_mute(&self) -> Result<()> {
        self.send(ControlInput::ToggleMute)
    }

    pub fn volume_up(&self) -> Result<()> {
        self.send(ControlInput::VolumeUp)
    }

    pub fn volume_down(&self) -> Result<()> {
        self.send(ControlInput::VolumeDown)
    }

    pub fn toggle_fullscreen(&self) -> Result<()> {
        self.send(ControlInput::ToggleFullscreen)
    }

    /// Report a fullscreen change from the frame host
    pub fn fullscreen_changed(&self, fullscreen: bool) -> Result<()> {
        self.send(ControlInput::FullscreenChanged(fullscreen))
    }

    pub fn toggle_speed(&self) -> Result<()> {
        self.send(ControlInput::ToggleSpeed)
    }

    pub fn key(&self, key: Key) -> Result<()> {
        self.send(ControlInput::Key(key))
    }

    pub fn pointer_moved(&self) -> Result<()> {
        self.send(ControlInput::PointerMoved)
    }

    /// Forward a notification from the media engine
    pub fn media_event(&self, event: MediaEvent) -> Result<()> {
        self.send(ControlInput::Media(event))
    }

    pub async fn snapshot(&self) -> Result<ControllerSnapshot> {
        let (respond_to, response) = oneshot::channel();
        self.send(ControlInput::Snapshot { respond_to })?;
        response.await.map_err(|_| ControlError::Disconnected)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(ControlInput::Shutdown)
    }
}
