//! Metric probes for merrin: reads /proc and /sys pseudo-files and turns each
//! one into a value or an explicit "unavailable".
//!
//! Every probe is independent. A missing file, a missing device or a
//! malformed line only degrades the metric it feeds, never the whole pass.

pub mod collector;
pub mod config;
pub mod cpu;
pub mod error;
pub mod gpu;
pub mod memory;
pub mod sensor;
pub mod snapshot;
pub mod temperature;
pub mod uptime;

pub use collector::Collector;
pub use config::{CollectorConfig, SensorTarget};
pub use cpu::CpuTimes;
pub use error::{Reading, SensorError};
pub use gpu::{GpuUsage, GpuVram};
pub use memory::MemoryInfo;
pub use snapshot::Snapshot;
pub use temperature::Temperature;
pub use uptime::UptimeInfo;

/// Round `v` to `places` decimal digits (half away from zero).
pub(crate) fn round_to(v: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (v * f).round() / f
}
