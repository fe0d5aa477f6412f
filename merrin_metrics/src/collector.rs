//! Runs every probe against one `CollectorConfig` and assembles a `Snapshot`.

use chrono::Local;
use tracing::debug;

use crate::config::CollectorConfig;
use crate::cpu::read_cpu_usage;
use crate::error::Reading;
use crate::gpu::{read_gpu_usage, GpuUsage};
use crate::memory::{read_memory, MemoryInfo};
use crate::snapshot::Snapshot;
use crate::temperature::{read_temperature, Temperature};
use crate::uptime::{read_uptime, UptimeInfo};

#[derive(Debug, Clone, Default)]
pub struct Collector {
    config: CollectorConfig,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn uptime(&self) -> Option<UptimeInfo> {
        available("uptime", read_uptime(&self.config.uptime_path))
    }

    pub fn memory(&self) -> Option<MemoryInfo> {
        available("memory", read_memory(&self.config.meminfo_path))
    }

    /// Blocks for `cpu_sample_interval` between the two samples.
    pub fn cpu_usage(&self) -> Option<f64> {
        available(
            "cpu_usage",
            read_cpu_usage(&self.config.stat_path, self.config.cpu_sample_interval()),
        )
    }

    pub fn gpu_usage(&self) -> Option<GpuUsage> {
        available(
            "gpu_usage",
            read_gpu_usage(
                &self.config.drm_root,
                &self.config.vram_used_file,
                &self.config.vram_total_file,
            ),
        )
    }

    pub fn cpu_temperature(&self) -> Option<Temperature> {
        available(
            "cpu_temp",
            read_temperature(&self.config.hwmon_root, &self.config.cpu_sensor),
        )
    }

    pub fn gpu_temperature(&self) -> Option<Temperature> {
        available(
            "gpu_temp",
            read_temperature(&self.config.hwmon_root, &self.config.gpu_sensor),
        )
    }

    /// Full pass. The CPU probe goes first so its sampling window doesn't
    /// push the other readings further from the timestamp.
    pub fn collect(&self) -> Snapshot {
        let cpu_usage = self.cpu_usage();
        Snapshot {
            cpu_usage,
            cpu_temp: self.cpu_temperature(),
            gpu_usage: self.gpu_usage(),
            gpu_temp: self.gpu_temperature(),
            memory: self.memory(),
            uptime: self.uptime(),
            user: std::env::var("USER").ok().filter(|u| !u.is_empty()),
            hostname: hostname::get()
                .ok()
                .and_then(|h| h.into_string().ok())
                .filter(|h| !h.is_empty()),
            taken_at: Some(Local::now()),
        }
    }
}

fn available<T>(metric: &'static str, r: Reading<T>) -> Option<T> {
    match r {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(metric, error = %e, "metric unavailable");
            None
        }
    }
}
