use thiserror::Error;

use crate::ui::bindings::ControlRole;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("Configuration error: missing control roles {}", format_roles(.missing))]
    Configuration { missing: Vec<ControlRole> },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Fullscreen error: {0}")]
    Fullscreen(String),

    #[error("Player controller disconnected")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, ControlError>;

fn format_roles(roles: &[ControlRole]) -> String {
    roles
        .iter()
        .map(|role| format!("{:?} ({})", role, role.selector()))
        .collect::<Vec<_>>()
        .join(", ")
}
