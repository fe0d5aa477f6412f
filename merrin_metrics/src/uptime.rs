//! Uptime from /proc/uptime ("<uptime secs> <idle secs>").

use std::path::Path;

use serde::Serialize;

use crate::error::{Reading, SensorError};
use crate::sensor::read_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UptimeInfo {
    pub hours: u64,
    pub minutes: u64,
}

impl UptimeInfo {
    pub fn from_seconds(secs: u64) -> Self {
        Self {
            hours: secs / 3600,
            minutes: (secs % 3600) / 60,
        }
    }
}

pub fn read_uptime(path: &Path) -> Reading<UptimeInfo> {
    let s = read_file(path)?;
    parse_uptime(&s).map_err(|reason| SensorError::parse(path, reason))
}

fn parse_uptime(s: &str) -> Result<UptimeInfo, String> {
    let tok = s.split_whitespace().next().ok_or("empty uptime file")?;
    let secs: f64 = tok.parse().map_err(|e| format!("{tok:?}: {e}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("{tok:?} is not a valid duration"));
    }
    Ok(UptimeInfo::from_seconds(secs.trunc() as u64))
}
