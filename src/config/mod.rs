// SPDX-License-Identifier: MPL-2.0
//! Configuration loading and saving.
//!
//! Scheduler settings can be overridden per user through a `notify.toml`
//! file in the platform config directory. Unset fields fall back to the
//! crate defaults; the resolved settings are validated once when converted
//! with [`Config::scheduler_settings`].

pub mod defaults;

use crate::error::Result;
use crate::notify::{Anchor, SchedulerSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "notify.toml";
const APP_DIR: &str = "iced_notify";

/// User-facing configuration, all fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub display_time_ms: Option<u64>,
    #[serde(default)]
    pub warning_display_time_ms: Option<u64>,
    #[serde(default)]
    pub entrance_delay_ms: Option<u64>,
    #[serde(default)]
    pub exit_delay_ms: Option<u64>,
    #[serde(default)]
    pub toast_height: Option<f32>,
    #[serde(default)]
    pub toast_gap: Option<f32>,
    #[serde(default)]
    pub entrance_shift: Option<f32>,
    #[serde(default)]
    pub anchor: Option<Anchor>,
}

impl Config {
    /// Resolves this configuration against the crate defaults.
    ///
    /// # Errors
    ///
    /// Propagates validation failures (zero capacity, zero display time).
    pub fn scheduler_settings(&self) -> Result<SchedulerSettings> {
        let base = SchedulerSettings::default();
        let settings = SchedulerSettings {
            capacity: self.capacity.unwrap_or(base.capacity),
            display_time: self
                .display_time_ms
                .map_or(base.display_time, Duration::from_millis),
            warning_display_time: self
                .warning_display_time_ms
                .map_or(base.warning_display_time, Duration::from_millis),
            entrance_delay: self
                .entrance_delay_ms
                .map_or(base.entrance_delay, Duration::from_millis),
            exit_delay: self
                .exit_delay_ms
                .map_or(base.exit_delay, Duration::from_millis),
            toast_height: self.toast_height.unwrap_or(base.toast_height),
            toast_gap: self.toast_gap.unwrap_or(base.toast_gap),
            entrance_shift: self.entrance_shift.unwrap_or(base.entrance_shift),
            anchor: self.anchor.unwrap_or(base.anchor),
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
