//! Tracing setup. The dashboard owns the terminal, so logs go to a file and
//! only when MERRIN_LOG is set (e.g. `MERRIN_LOG=merrin_metrics=debug`).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::config_dir;

pub const LOG_ENV: &str = "MERRIN_LOG";
pub const LOG_FILE: &str = "merrin.log";

/// Must run before the terminal enters raw mode: setup problems are
/// reported on stderr.
pub fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return;
    };
    let (path, file) = match open_log(&config_dir()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("merrin: {LOG_ENV} is set but logging is disabled: {e}");
            return;
        }
    };
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
    {
        eprintln!(
            "merrin: {LOG_ENV} is set but {} was not attached: {e}",
            path.display()
        );
    }
}

/// Creates `dir` if needed and opens `dir/merrin.log` for appending.
fn open_log(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)
        .map_err(|e| io::Error::new(e.kind(), format!("creating {}: {e}", dir.display())))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| io::Error::new(e.kind(), format!("opening {}: {e}", path.display())))?;
    Ok((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_log_in_a_fresh_directory() {
        let td = tempfile::tempdir().unwrap();
        let dir = td.path().join("merrin");
        let (path, _file) = open_log(&dir).unwrap();
        assert_eq!(path, dir.join(LOG_FILE));
        assert!(path.is_file());
    }

    #[test]
    fn unusable_directory_reports_the_path() {
        let td = tempfile::tempdir().unwrap();
        let blocker = td.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let err = open_log(&blocker.join("merrin")).unwrap_err();
        assert!(err.to_string().contains("not-a-dir"), "{err}");
    }
}
