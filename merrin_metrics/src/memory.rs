//! System memory from /proc/meminfo.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::error::Reading;
use crate::sensor::read_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    pub used_mb: u64,
    pub total_mb: u64,
}

impl MemoryInfo {
    /// Used is total minus MemAvailable: reclaimable cache and buffers count as free.
    pub fn from_kb(total_kb: u64, available_kb: u64) -> Self {
        Self {
            used_mb: total_kb.saturating_sub(available_kb) / 1024,
            total_mb: total_kb / 1024,
        }
    }
}

pub fn read_memory(path: &Path) -> Reading<MemoryInfo> {
    let s = read_file(path)?;
    let table = parse_meminfo(&s);
    let total = table.get("MemTotal").copied().unwrap_or(0);
    let available = table.get("MemAvailable").copied().unwrap_or(0);
    Ok(MemoryInfo::from_kb(total, available))
}

/// `Key:   value kB` lines into key -> value, reading the leading digits of
/// the value so a unit glued to the number still parses. Lines that don't fit
/// are skipped.
pub fn parse_meminfo(s: &str) -> HashMap<&str, u64> {
    s.lines()
        .filter_map(|line| {
            let (key, rest) = line.split_once(':')?;
            let rest = rest.trim_start();
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            let value = rest[..digits].parse::<u64>().ok()?;
            Some((key.trim(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_kb_to_mb() {
        let m = MemoryInfo::from_kb(8_000_000, 2_000_000);
        assert_eq!(m, MemoryInfo { used_mb: 5859, total_mb: 7812 });
    }

    #[test]
    fn skips_malformed_lines() {
        let s = "MemTotal:       16303428 kB\n\
                 garbage without colon\n\
                 \n\
                 Weird:          n/a\n\
                 MemFree:         1203456 kB\n\
                 MemAvailable:    9876543 kB\n";
        let t = parse_meminfo(s);
        assert_eq!(t.get("MemTotal"), Some(&16_303_428));
        assert_eq!(t.get("MemAvailable"), Some(&9_876_543));
        assert!(!t.contains_key("Weird"));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn available_larger_than_total_does_not_underflow() {
        let m = MemoryInfo::from_kb(1024, 4096);
        assert_eq!(m.used_mb, 0);
        assert!(m.used_mb <= m.total_mb);
    }

    #[test]
    fn unit_glued_to_value() {
        let t = parse_meminfo("MemTotal:8000000kB\nMemAvailable:2000000kB\n");
        let m = MemoryInfo::from_kb(t["MemTotal"], t["MemAvailable"]);
        assert_eq!(m, MemoryInfo { used_mb: 5859, total_mb: 7812 });
    }
}
