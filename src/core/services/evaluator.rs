//! Check evaluation
//!
//! Turns a scan result and the warning/critical boundaries into the status,
//! message and performance data that make up a Nagios status line.

use serde::Serialize;

use super::scanner::LogScanner;
use crate::core::models::{
    BoundaryError, BoundaryRule, CheckDefinition, ScanError, ScanReport, Status,
};
use crate::core::ports::{Clock, ScanLog};

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Check name
    pub name: String,
    /// Resulting state
    pub status: Status,
    /// Human-readable message, placeholders already replaced
    pub message: String,
    /// Performance data, when enabled and a value exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<String>,
}

/// Scan the check's log file and evaluate the result
#[must_use]
pub fn run_check(check: &CheckDefinition, clock: &dyn Clock, log: &dyn ScanLog) -> CheckOutcome {
    let scan = LogScanner::new(&check.scan, clock, log).scan(&check.logfile);
    evaluate(check, &scan)
}

/// Evaluate a scan result against the check's boundaries
///
/// Terminal scan errors and partial scan issues both yield `Unknown`. Otherwise
/// the critical rule is consulted first and the warning rule only when
/// critical did not fire.
#[must_use]
pub fn evaluate(check: &CheckDefinition, scan: &Result<ScanReport, ScanError>) -> CheckOutcome {
    let (status, message, performance) = match scan {
        Err(err) => (Status::Unknown, err.to_string(), None),
        Ok(report) => {
            let value = report.value.to_string();
            let performance = check.performance_data.then(|| {
                performance_data(&check.name, &value, &check.warning, &check.critical)
            });

            let (status, message) = match &report.issue {
                Some(issue) => {
                    (Status::Unknown, format!("{}: {issue}", check.logfile.display()))
                },
                None => judge(check, &value),
            };
            (status, check.render_message(&message, &value), performance)
        },
    };

    let status = if check.unknown_as_critical && status == Status::Unknown {
        Status::Critical
    } else {
        status
    };

    CheckOutcome {
        name: check.name.clone(),
        status,
        message,
        performance,
    }
}

/// Status and unrendered message for a successful scan value
#[must_use]
pub fn judge(check: &CheckDefinition, value: &str) -> (Status, String) {
    match classify(value, &check.warning, &check.critical) {
        Ok(Some((status, message))) => (status, message.to_string()),
        Ok(None) => (Status::Ok, check.message.clone()),
        Err(err) => (Status::Unknown, format!("Unexpected result, {err}")),
    }
}

/// Classify `value`, critical first
///
/// Returns the fired state and its message, or `None` when neither rule fires.
pub fn classify<'r>(
    value: &str,
    warning: &'r BoundaryRule,
    critical: &'r BoundaryRule,
) -> Result<Option<(Status, &'r str)>, BoundaryError> {
    if critical.in_bad_state(value)? {
        return Ok(Some((Status::Critical, critical.message().unwrap_or_default())));
    }
    if warning.in_bad_state(value)? {
        return Ok(Some((Status::Warning, warning.message().unwrap_or_default())));
    }
    Ok(None)
}

/// Format `'<name>'=<value>;<warning>;<critical>`
///
/// Thresholds are left empty for rules without one; trailing empty fields are
/// dropped.
#[must_use]
pub fn performance_data(
    name: &str,
    value: &str,
    warning: &BoundaryRule,
    critical: &BoundaryRule,
) -> String {
    let threshold = |rule: &BoundaryRule| rule.threshold().map(|t| t.to_string()).unwrap_or_default();
    let data = format!("'{name}'={value};{};{}", threshold(warning), threshold(critical));
    data.trim_end_matches(';').to_string()
}
