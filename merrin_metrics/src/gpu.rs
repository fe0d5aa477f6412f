//! GPU VRAM usage from the DRM class directory.
//!
//! Each `cardN` that exposes the visible-VRAM counters contributes one entry.
//! Connector entries (`card0-DP-1`, ...) and cards from drivers that don't
//! export the counters are skipped.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::trace;

use crate::error::{Reading, SensorError};
use crate::sensor::{list_dir, read_parsed};

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GpuVram {
    pub used_mb: u64,
    pub total_mb: u64,
}

impl GpuVram {
    pub fn from_bytes(used: u64, total: u64) -> Self {
        Self {
            used_mb: used.min(total) / MIB,
            total_mb: total / MIB,
        }
    }

    pub fn used_pct(&self) -> Option<f64> {
        (self.total_mb > 0).then(|| self.used_mb as f64 / self.total_mb as f64 * 100.0)
    }
}

/// Card name -> VRAM. Never empty.
pub type GpuUsage = BTreeMap<String, GpuVram>;

pub fn read_gpu_usage(drm_root: &Path, used_file: &Path, total_file: &Path) -> Reading<GpuUsage> {
    let usage: GpuUsage = list_dir(drm_root)?
        .into_iter()
        .filter_map(|card| {
            let dir = drm_root.join(&card);
            let vram = read_card(&dir, used_file, total_file)
                .map_err(|e| trace!(card = %card, error = %e, "skipping drm entry"))
                .ok()?;
            Some((card, vram))
        })
        .collect();
    if usage.is_empty() {
        return Err(SensorError::not_found(drm_root));
    }
    Ok(usage)
}

fn read_card(dir: &Path, used_file: &Path, total_file: &Path) -> Reading<GpuVram> {
    let used = read_parsed::<u64>(&dir.join(used_file))?;
    let total = read_parsed::<u64>(&dir.join(total_file))?;
    Ok(GpuVram::from_bytes(used, total))
}
