//! A fully validated check
//!
//! Built once from configuration; nothing in it changes while checks run.

use std::path::PathBuf;

use super::{BoundaryRule, ScanConfig};

/// Placeholder replaced with the scan result
pub const RESULT_TOKEN: &str = "[RESULT]";
/// Placeholder replaced with the log file path
pub const LOGFILE_TOKEN: &str = "[LOGFILE]";
/// Placeholder replaced with the configured date age
pub const DATEAGE_TOKEN: &str = "[DATEAGE]";

/// Everything needed to run one named check
#[derive(Debug)]
pub struct CheckDefinition {
    /// Name used on the command line and in performance data
    pub name: String,
    /// Log file to scan
    pub logfile: PathBuf,
    /// What the scan looks for
    pub scan: ScanConfig,
    /// Rule for the WARNING state
    pub warning: BoundaryRule,
    /// Rule for the CRITICAL state, consulted first
    pub critical: BoundaryRule,
    /// Message reported when no boundary fires
    pub message: String,
    /// Append performance data to the status line
    pub performance_data: bool,
    /// Report UNKNOWN outcomes as CRITICAL
    pub unknown_as_critical: bool,
}

impl CheckDefinition {
    /// A check that counts every line of `logfile` and never alerts
    #[must_use]
    pub fn new(name: impl Into<String>, logfile: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            logfile: logfile.into(),
            scan: ScanConfig::count_all(),
            warning: BoundaryRule::Disabled,
            critical: BoundaryRule::Disabled,
            message: RESULT_TOKEN.to_string(),
            performance_data: false,
            unknown_as_critical: false,
        }
    }

    /// Replace the message placeholders in `message`
    #[must_use]
    pub fn render_message(&self, message: &str, result: &str) -> String {
        let date_age = self
            .scan
            .date
            .as_ref()
            .map(|window| window.age.to_string())
            .unwrap_or_default();

        message
            .replace(RESULT_TOKEN, result)
            .replace(LOGFILE_TOKEN, &self.logfile.to_string_lossy())
            .replace(DATEAGE_TOKEN, &date_age)
    }
}
