//! Scan configuration and results
//!
//! A [`ScanConfig`] is built once per check and describes what a bottom-up scan
//! looks for. A scan yields either a [`ScanReport`] or a terminal
//! [`ScanError`].

use std::path::PathBuf;

use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;
use thiserror::Error;

use super::Age;
use crate::core::services::date::{DateError, DateExtractor, DateParser};

/// What a scan of one log file looks for
#[derive(Debug)]
pub struct ScanConfig {
    /// Lines must match this to be counted (all lines count when absent)
    pub filter: Option<Regex>,
    /// Bounded lookback window
    pub date: Option<DateWindow>,
    /// Zero-based column to average instead of counting lines
    pub average_column: Option<usize>,
    /// Checks against file metadata before any line is read
    pub file_checks: FileChecks,
}

impl ScanConfig {
    /// A config that counts every line of the file
    #[must_use]
    pub fn count_all() -> Self {
        Self {
            filter: None,
            date: None,
            average_column: None,
            file_checks: FileChecks::default(),
        }
    }
}

/// How far back a scan reads and how it finds dates on the way
#[derive(Debug)]
pub struct DateWindow {
    /// Lines older than now minus this stop the scan
    pub age: Age,
    /// Finds the date text in a line
    pub extractor: Box<dyn DateExtractor>,
    /// Turns date text into a timestamp
    pub parser: DateParser,
    /// Skip lines whose date cannot be read instead of aborting
    pub ignore_errors: bool,
    /// Look for dates on lines the filter rejects as well
    pub search_all: bool,
}

impl DateWindow {
    /// Timestamp below which lines are too old
    #[must_use]
    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        now.checked_sub_signed(self.age.as_delta()).unwrap_or(NaiveDateTime::MIN)
    }

    /// Whether a line without a readable date may be skipped
    #[must_use]
    pub const fn tolerates_bad_dates(&self) -> bool {
        self.ignore_errors || self.search_all
    }
}

/// Pre-scan checks on file metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileChecks {
    /// Report the file when its mtime is older than this
    pub stale_after: Option<TimeDelta>,
    /// Report the file when it has zero bytes
    pub alert_on_empty: bool,
    /// Report the file, without scanning it, when larger than this many bytes
    pub max_size: Option<u64>,
}

/// Scalar produced by a scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanValue {
    /// Number of matching lines
    Count(u64),
    /// Mean of the configured column over matching lines
    Average(f64),
}

impl std::fmt::Display for ScanValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            // whole averages keep one decimal so they read as averages
            Self::Average(average) if average.fract() == 0.0 => write!(f, "{average:.1}"),
            Self::Average(average) => write!(f, "{average}"),
        }
    }
}

/// A problem found during a scan that leaves the value in place
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanIssue {
    /// A line had no readable date and bad dates are not tolerated
    #[error("could not extract a valid date from line '{line}': {source}")]
    InvalidDate {
        /// The offending line
        line: String,
        /// Why the date could not be read
        source: DateError,
    },

    /// An average was requested but no line qualified
    #[error("no recent or unfiltered log lines, so no valid average could be calculated")]
    NoAverage,
}

/// Result of a completed scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    /// Count or average
    pub value: ScanValue,
    /// Number of lines that matched the filter within the window
    pub matched: u64,
    /// Lines read from the file, including skipped ones
    pub lines_read: u64,
    /// Partial error to surface alongside the value
    pub issue: Option<ScanIssue>,
}

/// Terminal scan failures; no value is available
#[derive(Debug, Error)]
pub enum ScanError {
    /// The log file does not exist
    #[error("logfile {0} does not exist")]
    Missing(PathBuf),

    /// Metadata could not be read
    #[error("could not read metadata of logfile {path}: {source}")]
    Metadata {
        /// Log file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file has not been written to recently enough
    #[error("logfile {path} was last modified at {modified}, more than {max_age} ago")]
    Stale {
        /// Log file
        path: PathBuf,
        /// Last modification time
        modified: NaiveDateTime,
        /// Allowed age, formatted for humans
        max_age: String,
    },

    /// The file is empty and empty files are reported
    #[error("logfile {0} is empty")]
    Empty(PathBuf),

    /// The file exceeds the size cap
    #[error("logfile {path} is {size} bytes, larger than the allowed {limit} bytes")]
    TooLarge {
        /// Log file
        path: PathBuf,
        /// Actual size
        size: u64,
        /// Configured cap
        limit: u64,
    },

    /// The file could not be opened
    #[error("could not open logfile {path}: {source}")]
    Unreadable {
        /// Log file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Reading failed part way through
    #[error("error while reading logfile {path}: {source}")]
    Read {
        /// Log file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The average column is missing or not a number
    #[error("could not read a number from column {column} in line '{line}'")]
    AverageColumn {
        /// Configured column
        column: usize,
        /// The offending line
        line: String,
    },
}
