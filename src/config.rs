use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::utils::ControlError;

pub const MIN_VOLUME_STEP: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub controls: ControlsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Source assigned on first play when the element has none
    #[serde(default = "default_source")]
    pub default_source: String,

    #[serde(default = "default_wind_step")]
    pub wind_step_secs: f64,

    #[serde(default = "default_wind_interval")]
    pub wind_interval_ms: u64,

    #[serde(default = "default_nudge_step")]
    pub nudge_step_secs: f64,

    #[serde(default = "default_volume_step")]
    pub volume_step: f64,

    /// Volumes at or above this show the high volume icon
    #[serde(default = "default_volume_threshold")]
    pub volume_icon_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default = "default_cursor_autohide")]
    pub cursor_autohide_secs: u64,

    #[serde(default = "default_controls_display")]
    pub controls_display_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.validate()?;
        info!("Config loaded successfully");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ControlError> {
        url::Url::parse(&self.playback.default_source).map_err(|e| {
            ControlError::InvalidConfig(format!(
                "default_source {:?} is not a valid URL: {}",
                self.playback.default_source, e
            ))
        })?;

        if !(self.playback.wind_step_secs > 0.0) {
            return Err(ControlError::InvalidConfig(
                "wind_step_secs must be positive".to_string(),
            ));
        }
        if self.playback.wind_interval_ms == 0 {
            return Err(ControlError::InvalidConfig(
                "wind_interval_ms must be positive".to_string(),
            ));
        }
        if !(self.playback.nudge_step_secs > 0.0) {
            return Err(ControlError::InvalidConfig(
                "nudge_step_secs must be positive".to_string(),
            ));
        }
        // Volume steps are rounded to 1%
        if !(self.playback.volume_step >= MIN_VOLUME_STEP && self.playback.volume_step <= 1.0) {
            return Err(ControlError::InvalidConfig(format!(
                "volume_step must be in [{}, 1]",
                MIN_VOLUME_STEP
            )));
        }
        if !(0.0..=1.0).contains(&self.playback.volume_icon_threshold) {
            return Err(ControlError::InvalidConfig(
                "volume_icon_threshold must be in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("playdeck").join("config.toml"))
    }
}

impl PlaybackConfig {
    pub fn wind_interval(&self) -> Duration {
        Duration::from_millis(self.wind_interval_ms)
    }
}

impl ControlsConfig {
    pub fn cursor_autohide(&self) -> Duration {
        Duration::from_secs(self.cursor_autohide_secs)
    }

    pub fn controls_display(&self) -> Duration {
        Duration::from_secs(self.controls_display_secs)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_source: default_source(),
            wind_step_secs: default_wind_step(),
            wind_interval_ms: default_wind_interval(),
            nudge_step_secs: default_nudge_step(),
            volume_step: default_volume_step(),
            volume_icon_threshold: default_volume_threshold(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            cursor_autohide_secs: default_cursor_autohide(),
            controls_display_secs: default_controls_display(),
        }
    }
}

// Default value functions
fn default_source() -> String {
    "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4".to_string()
}
fn default_wind_step() -> f64 { 3.0 }
fn default_wind_interval() -> u64 { 200 }
fn default_nudge_step() -> f64 { 10.0 }
fn default_volume_step() -> f64 { 0.1 }
fn default_volume_threshold() -> f64 { 0.5 }
fn default_cursor_autohide() -> u64 { 4 }
fn default_controls_display() -> u64 { 3 }
