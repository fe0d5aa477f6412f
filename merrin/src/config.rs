//! Dashboard configuration: refresh cadence, warning thresholds and sensor paths.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/merrin/config.json (fallback ~/.config/merrin/config.json)

use merrin_metrics::CollectorConfig;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use tracing::warn;

use crate::cli::DEFAULT_REFRESH_SECS;

/// Values at or above these render in the warning color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub cpu_usage_pct: f64,
    // AMD CPUs throttle around 95 C
    pub cpu_temp_c: f64,
    pub gpu_vram_pct: f64,
    // junction throttles around 110 C
    pub gpu_temp_c: f64,
    pub memory_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu_usage_pct: 90.0,
            cpu_temp_c: 85.0,
            gpu_vram_pct: 95.0,
            gpu_temp_c: 95.0,
            memory_pct: 95.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub refresh_secs: u64,
    pub thresholds: Thresholds,
    pub sensors: CollectorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_secs: DEFAULT_REFRESH_SECS,
            thresholds: Thresholds::default(),
            sensors: CollectorConfig::default(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("merrin")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("merrin")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Missing file means defaults; a broken one is reported and ignored.
pub fn load_config() -> AppConfig {
    let path = config_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring malformed config");
            AppConfig::default()
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config");
            AppConfig::default()
        }
    }
}
