//! Snapshot of a log file's metadata
//!
//! Taken once before a scan starts and never refreshed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};

/// Path, size and modification time of a log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// Location on disk
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Last modification time, local wall clock
    pub modified: NaiveDateTime,
}

impl LogFile {
    /// Read the metadata of `path`
    pub fn inspect(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let modified: DateTime<Local> = metadata.modified()?.into();
        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            modified: modified.naive_local(),
        })
    }

    /// Whether the file has zero bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}
