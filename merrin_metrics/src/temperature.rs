//! Temperature lookup across hwmon chips by (chip name, channel label).

use std::path::Path;

use serde::Serialize;
use tracing::trace;

use crate::config::SensorTarget;
use crate::error::{Reading, SensorError};
use crate::round_to;
use crate::sensor::{list_dir, read_parsed, read_trimmed};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Temperature {
    pub celsius: f64,
    pub chip: String,
    pub label: String,
}

/// First `tempN_label` equal to `target.label` (case-insensitive) on a chip
/// whose `name` contains `target.chip` wins.
pub fn read_temperature(hwmon_root: &Path, target: &SensorTarget) -> Reading<Temperature> {
    let want_chip = target.chip.to_lowercase();
    for hwmon in list_dir(hwmon_root)? {
        let chip_dir = hwmon_root.join(&hwmon);
        let Ok(name) = read_trimmed(&chip_dir.join("name")) else {
            continue;
        };
        if !name.to_lowercase().contains(&want_chip) {
            continue;
        }
        let Ok(entries) = list_dir(&chip_dir) else {
            continue;
        };
        for entry in entries {
            let Some(input) = input_for_label(&entry) else {
                continue;
            };
            let Ok(label) = read_trimmed(&chip_dir.join(&entry)) else {
                continue;
            };
            if !label.eq_ignore_ascii_case(&target.label) {
                continue;
            }
            match read_parsed::<i64>(&chip_dir.join(&input)) {
                Ok(millis) => {
                    return Ok(Temperature {
                        celsius: round_to(millis as f64 / 1000.0, 1),
                        chip: name,
                        label,
                    })
                }
                Err(e) => trace!(chip = %hwmon, channel = %entry, error = %e, "unreadable input"),
            }
        }
    }
    Err(SensorError::not_found(hwmon_root))
}

/// "temp3_label" -> "temp3_input"; anything else -> None.
fn input_for_label(file: &str) -> Option<String> {
    let idx = file.strip_prefix("temp")?.strip_suffix("_label")?;
    if idx.is_empty() || !idx.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("temp{idx}_input"))
}
