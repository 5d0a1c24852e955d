pub mod bindings;
pub mod player_controls;
pub mod terminal;

pub use bindings::{ControlPanel, ControlRole, ControlWidget, FrameHost, WidgetLookup};
pub use player_controls::{PlayerController, PlayerHandle};
