//! Resilient file reads over kernel pseudo-files.
//!
//! These files are regenerated on every read and may vanish between two
//! calls (hot-unplugged devices, unloaded drivers). A read either yields
//! content or a `SensorError`; nothing here panics.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Reading, SensorError};

pub fn read_file(path: &Path) -> Reading<String> {
    fs::read_to_string(path).map_err(|e| SensorError::unavailable(path, e))
}

pub fn read_trimmed(path: &Path) -> Reading<String> {
    read_file(path).map(|s| s.trim().to_string())
}

/// Read a file holding a single value (e.g. "8573157376\n").
pub fn read_parsed<T>(path: &Path) -> Reading<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s = read_trimmed(path)?;
    s.parse::<T>()
        .map_err(|e| SensorError::parse(path, format!("{s:?}: {e}")))
}

/// Entry names of `dir`, sorted so "first match" scans are stable across runs.
pub fn list_dir(dir: &Path) -> Reading<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| SensorError::unavailable(dir, e))?;
    let mut names: Vec<String> = entries
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_unavailable() {
        let err = read_file(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, SensorError::PathUnavailable { .. }));
    }

    #[test]
    fn parsed_value_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("v");
        fs::write(&p, "  4096\n").unwrap();
        assert_eq!(read_parsed::<u64>(&p).unwrap(), 4096);
    }

    #[test]
    fn garbage_value_is_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("v");
        fs::write(&p, "n/a\n").unwrap();
        let err = read_parsed::<u64>(&p).unwrap_err();
        assert!(matches!(err, SensorError::Parse { .. }), "{err}");
    }

    #[test]
    fn list_dir_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for n in ["hwmon2", "hwmon0", "hwmon1"] {
            fs::create_dir(dir.path().join(n)).unwrap();
        }
        assert_eq!(
            list_dir(dir.path()).unwrap(),
            vec!["hwmon0", "hwmon1", "hwmon2"]
        );
    }
}
