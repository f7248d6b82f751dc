//! Output formatting for human and JSON modes
//!
//! Human mode prints Nagios status lines; JSON mode prints the same outcomes
//! as machine-parseable objects.

use serde::Serialize;

use crate::core::services::CheckOutcome;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Nagios status lines (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Format `<STATUS>: <message>[ | <performance>]`
#[must_use]
pub fn status_line(outcome: &CheckOutcome) -> String {
    match &outcome.performance {
        Some(performance) => format!("{}: {} | {performance}", outcome.status, outcome.message),
        None => format!("{}: {}", outcome.status, outcome.message),
    }
}

/// Outcomes of one or more checks
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// One entry per check, in run order
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for outcome in &self.outcomes {
                    println!("{}", status_line(outcome));
                }
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Checks known to a config file
#[derive(Debug, Serialize)]
pub struct CheckListResult {
    /// Config file the names come from
    pub config: String,
    /// Runnable check names
    pub checks: Vec<String>,
}

impl CheckListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    fn render_human(&self) {
        if self.checks.is_empty() {
            println!("No checks found in {}.", self.config);
            return;
        }
        println!("Known checks:");
        for name in &self.checks {
            println!("{name}");
        }
    }
}

/// Generated NRPE command definitions
#[derive(Debug, Serialize)]
pub struct NrpeResult {
    /// Program that generated the lines
    pub generator: String,
    /// One `command[...]` line per check
    pub commands: Vec<String>,
}

impl NrpeResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("# NRPE entries generated by {}", self.generator);
                for command in &self.commands {
                    println!("{command}");
                }
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
