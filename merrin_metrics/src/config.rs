//! Where the probes look and what they look for.
//!
//! Defaults point at the live kernel interfaces. `rooted_at` rebases every
//! path under another directory so tests can run against a fake tree.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A hwmon chip (matched by substring of its `name` file) and one of its
/// temperature channels (matched against `tempN_label`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorTarget {
    pub chip: String,
    pub label: String,
}

impl SensorTarget {
    pub fn new(chip: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            chip: chip.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub uptime_path: PathBuf,
    pub meminfo_path: PathBuf,
    pub stat_path: PathBuf,
    pub drm_root: PathBuf,
    pub hwmon_root: PathBuf,
    // relative to each DRM card directory
    pub vram_used_file: PathBuf,
    pub vram_total_file: PathBuf,
    pub cpu_sensor: SensorTarget,
    pub gpu_sensor: SensorTarget,
    pub cpu_sample_interval_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            uptime_path: PathBuf::from("/proc/uptime"),
            meminfo_path: PathBuf::from("/proc/meminfo"),
            stat_path: PathBuf::from("/proc/stat"),
            drm_root: PathBuf::from("/sys/class/drm"),
            hwmon_root: PathBuf::from("/sys/class/hwmon"),
            vram_used_file: PathBuf::from("device/mem_info_vis_vram_used"),
            vram_total_file: PathBuf::from("device/mem_info_vis_vram_total"),
            // AMD: Tctl is the throttle reference, junction the die hotspot
            cpu_sensor: SensorTarget::new("k10temp", "tctl"),
            gpu_sensor: SensorTarget::new("amdgpu", "junction"),
            cpu_sample_interval_ms: 1000,
        }
    }
}

impl CollectorConfig {
    pub fn cpu_sample_interval(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_interval_ms)
    }

    /// Default layout with /proc and /sys living under `root`.
    pub fn rooted_at(root: &Path) -> Self {
        let base = Self::default();
        Self {
            uptime_path: rebase(root, &base.uptime_path),
            meminfo_path: rebase(root, &base.meminfo_path),
            stat_path: rebase(root, &base.stat_path),
            drm_root: rebase(root, &base.drm_root),
            hwmon_root: rebase(root, &base.hwmon_root),
            ..base
        }
    }
}

fn rebase(root: &Path, p: &Path) -> PathBuf {
    root.join(p.strip_prefix("/").unwrap_or(p))
}
