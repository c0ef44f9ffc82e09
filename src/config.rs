/// TOML configuration with sensible defaults.
/// No config file is required to run — defaults work out of the box.

use crate::classifier::HandHeuristic;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sprite geometry file published by the compositor helper
    pub sprite_path: String,
    /// Waveform settings file shared with the haptics frontend
    pub settings_path: String,
    /// Haptics service base URL receiving PlayWaveform calls
    pub actuator_endpoint: String,
    pub poll_interval_ms: u64,
    /// Minimum hover time before feedback fires (0 = first tick after entry)
    pub min_dwell_ms: u64,
    /// Which geometric policy decides "clickable"
    pub heuristic: HandHeuristic,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sprite_path: default_sprite_path(),
            settings_path: crate::settings::default_settings_path(),
            actuator_endpoint: "http://127.0.0.1:8821".into(),
            poll_interval_ms: 50,
            min_dwell_ms: 0,
            heuristic: HandHeuristic::default(),
        }
    }
}

fn default_sprite_path() -> String {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        format!("{runtime_dir}/haptic-cursor/sprite")
    } else {
        "/tmp/haptic-cursor/sprite".into()
    }
}

impl Config {
    /// Load config from the default config file path, or return defaults if not found.
    pub fn load() -> Self {
        let config_path = config_file_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {config_path}");
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {config_path}: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file found at {config_path}. Using defaults.");
                Self::default()
            }
        }
    }
}

fn config_file_path() -> String {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        format!("{config_home}/haptic-cursor/config.toml")
    } else if let Ok(home) = std::env::var("HOME") {
        format!("{home}/.config/haptic-cursor/config.toml")
    } else {
        "haptic-cursor.toml".into()
    }
}
