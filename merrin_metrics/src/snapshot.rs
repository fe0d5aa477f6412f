//! One collection pass. Every field is independently optional.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::gpu::GpuUsage;
use crate::memory::MemoryInfo;
use crate::temperature::Temperature;
use crate::uptime::UptimeInfo;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub cpu_usage: Option<f64>,
    pub cpu_temp: Option<Temperature>,
    pub gpu_usage: Option<GpuUsage>,
    pub gpu_temp: Option<Temperature>,
    pub memory: Option<MemoryInfo>,
    pub uptime: Option<UptimeInfo>,
    pub user: Option<String>,
    pub hostname: Option<String>,
    pub taken_at: Option<DateTime<Local>>,
}
