//! Bounded-lookback log scanner
//!
//! Walks a log file bottom-up, counting (or averaging a column of) the lines
//! that match the filter, and stops as soon as it reaches a line older than
//! the configured date window. Lines before that point are never read.

use std::io;
use std::path::Path;

use chrono::{NaiveDateTime, TimeDelta};

use super::date::DateError;
use super::reverse_reader::{DEFAULT_CHUNK_SIZE, ReverseLineReader};
use crate::core::models::{
    DateWindow, LogFile, ScanConfig, ScanError, ScanIssue, ScanReport, ScanValue,
};
use crate::core::ports::{Clock, ScanLog};

/// Runs a [`ScanConfig`] against log files
///
/// Holds no per-scan state: every call to [`LogScanner::scan`] starts from
/// scratch.
pub struct LogScanner<'a> {
    config: &'a ScanConfig,
    clock: &'a dyn Clock,
    log: &'a dyn ScanLog,
    chunk_size: usize,
}

impl std::fmt::Debug for LogScanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogScanner")
            .field("config", &self.config)
            .field("chunk_size", &self.chunk_size)
            .finish_non_exhaustive()
    }
}

impl<'a> LogScanner<'a> {
    /// Create a scanner reading with the default chunk size
    #[must_use]
    pub fn new(config: &'a ScanConfig, clock: &'a dyn Clock, log: &'a dyn ScanLog) -> Self {
        Self {
            config,
            clock,
            log,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the read chunk size
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Scan the log file at `path`
    pub fn scan(&self, path: &Path) -> Result<ScanReport, ScanError> {
        let now = self.clock.now();
        let file = self.inspect(path, now)?;

        let lines = ReverseLineReader::open(&file.path, self.chunk_size).map_err(|source| {
            ScanError::Unreadable {
                path: file.path.clone(),
                source,
            }
        })?;
        self.log.debug(&format!("scanning {} ({} bytes) bottom-up", path.display(), file.size));

        let cutoff = self.config.date.as_ref().map(|window| window.cutoff(now));
        let mut tally = Tally::default();

        for line in lines {
            let line = line.map_err(|source| ScanError::Read {
                path: file.path.clone(),
                source,
            })?;
            tally.lines_read += 1;

            match self.examine(&line, cutoff)? {
                Step::Continue => {},
                Step::TooOld => {
                    self.log.debug(&format!("reached a line older than the cutoff: {line}"));
                    break;
                },
                Step::Abort(issue) => {
                    self.log.warn(&issue.to_string());
                    tally.issue = Some(issue);
                    break;
                },
                Step::Counted(value) => {
                    tally.matched += 1;
                    tally.sum += value.unwrap_or_default();
                },
            }
        }

        self.log.debug(&format!(
            "read {} line(s), {} matched",
            tally.lines_read, tally.matched
        ));
        Ok(self.report(tally))
    }

    /// Check file metadata before opening it
    fn inspect(&self, path: &Path, now: NaiveDateTime) -> Result<LogFile, ScanError> {
        let file = LogFile::inspect(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ScanError::Missing(path.to_path_buf())
            } else {
                ScanError::Metadata {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let checks = &self.config.file_checks;

        if let Some(max_age) = checks.stale_after {
            if now.signed_duration_since(file.modified) > max_age {
                return Err(ScanError::Stale {
                    path: file.path,
                    modified: file.modified,
                    max_age: humanize(max_age),
                });
            }
        }
        if checks.alert_on_empty && file.is_empty() {
            return Err(ScanError::Empty(file.path));
        }
        if let Some(limit) = checks.max_size {
            if file.size > limit {
                return Err(ScanError::TooLarge {
                    path: file.path,
                    size: file.size,
                    limit,
                });
            }
        }
        Ok(file)
    }

    /// Decide what one line contributes to the scan
    fn examine(&self, line: &str, cutoff: Option<NaiveDateTime>) -> Result<Step, ScanError> {
        if line.is_empty() {
            return Ok(Step::Continue);
        }

        let matches = self.config.filter.as_ref().is_none_or(|filter| filter.is_match(line));
        let search_all = self.config.date.as_ref().is_some_and(|window| window.search_all);
        if !matches && !search_all {
            return Ok(Step::Continue);
        }

        if let (Some(window), Some(cutoff)) = (&self.config.date, cutoff) {
            match read_date(window, line, cutoff) {
                Ok(stamp) if stamp < cutoff => return Ok(Step::TooOld),
                Ok(_) => {},
                Err(source) => {
                    self.log.debug(&format!("no usable date in line '{line}': {source}"));
                    if !window.tolerates_bad_dates() {
                        return Ok(Step::Abort(ScanIssue::InvalidDate {
                            line: line.to_string(),
                            source,
                        }));
                    }
                    return Ok(Step::Continue);
                },
            }
        }

        if !matches {
            return Ok(Step::Continue);
        }
        let value = self.config.average_column.map(|column| column_value(line, column)).transpose()?;
        Ok(Step::Counted(value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn report(&self, tally: Tally) -> ScanReport {
        let Tally {
            matched,
            lines_read,
            sum,
            issue,
        } = tally;

        let (value, issue) = match self.config.average_column {
            None => (ScanValue::Count(matched), issue),
            Some(_) if matched == 0 => (ScanValue::Average(sum), Some(ScanIssue::NoAverage)),
            Some(_) => (ScanValue::Average(sum / matched as f64), issue),
        };

        ScanReport {
            value,
            matched,
            lines_read,
            issue,
        }
    }
}

/// What the scan loop does after looking at a line
enum Step {
    /// Nothing to record
    Continue,
    /// The line matched; carries the average column value when configured
    Counted(Option<f64>),
    /// The line is older than the window
    TooOld,
    /// The line has no readable date and bad dates are fatal
    Abort(ScanIssue),
}

#[derive(Default)]
struct Tally {
    matched: u64,
    lines_read: u64,
    sum: f64,
    issue: Option<ScanIssue>,
}

fn read_date(
    window: &DateWindow,
    line: &str,
    cutoff: NaiveDateTime,
) -> Result<NaiveDateTime, DateError> {
    let text = window.extractor.extract(line)?;
    window.parser.parse(&text, cutoff)
}

fn column_value(line: &str, column: usize) -> Result<f64, ScanError> {
    line.split_whitespace()
        .nth(column)
        .and_then(|token| token.parse::<f64>().ok())
        .ok_or_else(|| ScanError::AverageColumn {
            column,
            line: line.to_string(),
        })
}

fn humanize(delta: TimeDelta) -> String {
    let minutes = delta.num_minutes();
    if minutes % (24 * 60) == 0 {
        format!("{}d", minutes / (24 * 60))
    } else if minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{minutes}m")
    }
}
