//! Custom playback controls for a single media element.
//!
//! [`ui::PlayerController`] owns the control panel and talks to the
//! playback engine through [`player::MediaElement`]. Front ends drive it
//! through the cloneable [`ui::PlayerHandle`].

pub mod config;
pub mod player;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use player::{ControllerSnapshot, MediaElement, MediaEvent};
pub use ui::player_controls::{ControlInput, Key};
pub use ui::{ControlPanel, ControlRole, PlayerController, PlayerHandle};
pub use utils::{ControlError, Result};
