//! CPU utilization from two samples of the aggregate /proc/stat line.

use std::path::Path;
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Reading, SensorError};
use crate::round_to;
use crate::sensor::read_file;

/// Cumulative time counters in USER_HZ ticks, in /proc/stat order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTimes {
    pub fn from_counters(c: [u64; 8]) -> Self {
        let [user, nice, system, idle, iowait, irq, softirq, steal] = c;
        Self {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
        }
    }

    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    /// Busy percentage between `earlier` and `self`, 0..=100 with 2 decimals.
    /// No elapsed ticks yields exactly 0.0.
    pub fn usage_since(&self, earlier: &CpuTimes) -> f64 {
        let total_diff = self.total().saturating_sub(earlier.total());
        if total_diff == 0 {
            return 0.0;
        }
        let idle_diff = self.idle_total().saturating_sub(earlier.idle_total());
        let busy = total_diff.saturating_sub(idle_diff) as f64;
        round_to(100.0 * busy / total_diff as f64, 2).clamp(0.0, 100.0)
    }
}

/// Parse the first line: "cpu  user nice system idle iowait irq softirq steal ...".
pub fn parse_stat(s: &str) -> Result<CpuTimes, String> {
    let line = s.lines().next().ok_or("empty stat file")?;
    let mut it = line.split_whitespace();
    match it.next() {
        Some("cpu") => {}
        other => return Err(format!("expected aggregate cpu line, got {other:?}")),
    }
    let mut counters = [0u64; 8];
    for (i, slot) in counters.iter_mut().enumerate() {
        let tok = it
            .next()
            .ok_or_else(|| format!("only {i} of 8 cpu counters present"))?;
        *slot = tok.parse().map_err(|e| format!("counter {tok:?}: {e}"))?;
    }
    Ok(CpuTimes::from_counters(counters))
}

pub fn read_cpu_times(path: &Path) -> Reading<CpuTimes> {
    let s = read_file(path)?;
    parse_stat(&s).map_err(|reason| SensorError::parse(path, reason))
}

/// Sample, sleep for `interval`, sample again.
///
/// Blocks the calling thread for `interval`. If the first read fails it
/// returns at once without sleeping.
pub fn read_cpu_usage(path: &Path, interval: Duration) -> Reading<f64> {
    sample_across(path, || thread::sleep(interval))
}

/// Two samples of `path` with `between` run in the gap. `between` is skipped
/// when the first sample fails.
pub fn sample_across(path: &Path, between: impl FnOnce()) -> Reading<f64> {
    let first = read_cpu_times(path)?;
    between();
    let second = read_cpu_times(path)?;
    Ok(second.usage_since(&first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Instant;

    #[test]
    fn usage_from_two_samples() {
        let a = CpuTimes::from_counters([100, 0, 50, 800, 50, 0, 0, 0]);
        let b = CpuTimes::from_counters([150, 0, 70, 850, 60, 0, 0, 0]);
        assert_eq!(a.total(), 1000);
        assert_eq!(a.idle_total(), 850);
        assert_eq!(b.total(), 1130);
        assert_eq!(b.idle_total(), 910);
        assert_eq!(b.usage_since(&a), 53.85);
    }

    #[test]
    fn identical_samples_are_zero() {
        let a = CpuTimes::from_counters([5, 1, 2, 90, 2, 0, 0, 0]);
        assert_eq!(a.usage_since(&a), 0.0);
    }

    #[test]
    fn fully_idle_and_fully_busy() {
        let a = CpuTimes::from_counters([0, 0, 0, 100, 0, 0, 0, 0]);
        let idle = CpuTimes::from_counters([0, 0, 0, 200, 0, 0, 0, 0]);
        let busy = CpuTimes::from_counters([100, 0, 0, 100, 0, 0, 0, 0]);
        assert_eq!(idle.usage_since(&a), 0.0);
        assert_eq!(busy.usage_since(&a), 100.0);
    }

    #[test]
    fn parses_first_line_only_and_ignores_guest_fields() {
        let s = "cpu  4705 356 584 3699 23 23 0 0 0 0\ncpu0 1393 280 290 1827 5 1 0 0 0 0\n";
        let t = parse_stat(s).unwrap();
        assert_eq!(t.user, 4705);
        assert_eq!(t.steal, 0);
        assert_eq!(t.total(), 4705 + 356 + 584 + 3699 + 23 + 23);
    }

    #[test]
    fn short_or_wrong_line_is_an_error() {
        assert!(parse_stat("cpu 1 2 3").is_err());
        assert!(parse_stat("cpu0 1 2 3 4 5 6 7 8").is_err());
        assert!(parse_stat("cpu 1 2 x 4 5 6 7 8").is_err());
        assert!(parse_stat("").is_err());
    }

    #[test]
    fn missing_stat_returns_without_sleeping() {
        let td = tempfile::tempdir().unwrap();
        let started = Instant::now();
        let err = read_cpu_usage(&td.path().join("stat"), Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, SensorError::PathUnavailable { .. }), "{err}");
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn first_failure_skips_the_wait() {
        let td = tempfile::tempdir().unwrap();
        let mut waited = false;
        assert!(sample_across(&td.path().join("stat"), || waited = true).is_err());
        assert!(!waited);
    }

    #[test]
    fn stat_vanishing_between_samples_is_unavailable() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("stat");
        fs::write(&path, "cpu  100 0 50 800 50 0 0 0\n").unwrap();
        let err = sample_across(&path, || fs::remove_file(&path).unwrap()).unwrap_err();
        assert!(matches!(err, SensorError::PathUnavailable { .. }), "{err}");
    }

    #[test]
    fn stat_corrupted_between_samples_is_a_parse_error() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("stat");
        fs::write(&path, "cpu  100 0 50 800 50 0 0 0\n").unwrap();
        let err = sample_across(&path, || fs::write(&path, "cpu 1 2\n").unwrap()).unwrap_err();
        assert!(matches!(err, SensorError::Parse { .. }), "{err}");
    }

    #[test]
    fn counters_swapped_between_samples() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("stat");
        fs::write(&path, "cpu  100 0 50 800 50 0 0 0\n").unwrap();
        let usage = sample_across(&path, || {
            fs::write(&path, "cpu  150 0 70 850 60 0 0 0\n").unwrap()
        })
        .unwrap();
        assert_eq!(usage, 53.85);
    }
}
