//! Application configuration
//!
//! Read once at startup from `trimdeck.json` in the working directory, or
//! from the file named by `TRIMDECK_CONFIG`. Every field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::controller::InputSettings;
use crate::player::PlayerSettings;

const CONFIG_FILE: &str = "trimdeck.json";
const CONFIG_ENV: &str = "TRIMDECK_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// JSON file holding the persisted trims.
    pub storage_path: PathBuf,
    /// Search-list JSON with the videos to show; the built-in list is used when missing.
    pub catalog_path: PathBuf,
    pub tick_interval_ms: u64,
    pub init_attempts: u32,
    pub init_retry_delay_ms: u64,
    pub autoplay_grace_ms: u64,
    /// `null` disables the remount watchdog.
    pub remount_after_ms: Option<u64>,
    pub seek_step_secs: f64,
    pub track_inset: u16,
    pub api_latency_ms: u64,
    pub ready_latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(".data/trims.json"),
            catalog_path: PathBuf::from("videos.json"),
            tick_interval_ms: 16,
            init_attempts: 3,
            init_retry_delay_ms: 1000,
            autoplay_grace_ms: 1500,
            remount_after_ms: Some(2000),
            seek_step_secs: 5.0,
            track_inset: 1,
            api_latency_ms: 300,
            ready_latency_ms: 400,
        }
    }
}

impl AppConfig {
    /// Loads the configured file, falling back to defaults when none exists.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    tracing::debug!("No {} found, using defaults", CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn player_settings(&self) -> PlayerSettings {
        PlayerSettings {
            tick_interval: Duration::from_millis(self.tick_interval_ms.max(1)),
            init_attempts: self.init_attempts.max(1),
            init_retry_delay: Duration::from_millis(self.init_retry_delay_ms),
            autoplay_grace: Duration::from_millis(self.autoplay_grace_ms),
            remount_after: self.remount_after_ms.map(Duration::from_millis),
        }
    }

    pub fn input_settings(&self) -> InputSettings {
        InputSettings {
            seek_step: self.seek_step_secs,
            track_inset: self.track_inset,
        }
    }

    pub fn api_latency(&self) -> Duration {
        Duration::from_millis(self.api_latency_ms)
    }

    pub fn ready_latency(&self) -> Duration {
        Duration::from_millis(self.ready_latency_ms)
    }
}
