//! Failure taxonomy for probes. Neither variant is fatal: the collector logs
//! it and reports the metric as unavailable.

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// File or directory missing, unreadable, or hardware not present.
    #[error("{} is unavailable: {source}", .path.display())]
    PathUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Content was read but did not have the expected shape.
    #[error("could not parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
    /// An enumeration finished without a single qualifying entry.
    #[error("no match under {}", .root.display())]
    NotFound { root: PathBuf },
}

pub type Reading<T> = Result<T, SensorError>;

impl SensorError {
    pub(crate) fn unavailable(path: &Path, source: io::Error) -> Self {
        SensorError::PathUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, reason: impl Into<String>) -> Self {
        SensorError::Parse {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(root: &Path) -> Self {
        SensorError::NotFound {
            root: root.to_path_buf(),
        }
    }
}
