//! Run checks and print their status lines

use logcheck::config::{ChecksFile, ConfigError};
use logcheck::core::models::Status;
use logcheck::core::ports::{ScanLog, SystemClock};
use logcheck::core::services::{CheckOutcome, run_check};
use logcheck::output::{CheckReport, OutputMode};

/// Run a single named check, returning its Nagios exit code
pub fn check_one(
    checks: &ChecksFile,
    name: &str,
    log: &dyn ScanLog,
    mode: OutputMode,
) -> anyhow::Result<i32> {
    let definition = match checks.definition(name) {
        Ok(definition) => definition,
        Err(ConfigError::UnknownCheck(_)) => {
            anyhow::bail!(
                "Could not find {name} in the list of known checks. \
                 Run with -l to get a list of known checks."
            );
        },
        Err(err) => return Err(err.into()),
    };

    let outcome = run_check(&definition, &SystemClock, log);
    let code = outcome.status.exit_code();
    CheckReport {
        outcomes: vec![outcome],
    }
    .render(mode);
    Ok(code)
}

/// Run every check in config order
///
/// A check that fails to validate is reported as UNKNOWN; the others still run.
pub fn check_all(checks: &ChecksFile, log: &dyn ScanLog, mode: OutputMode) {
    if mode == OutputMode::Human {
        println!(
            "No check name was given, so all known checks run for testing purposes. \
             Run with -h for more options.\n"
        );
    }

    let outcomes = checks
        .check_names()
        .into_iter()
        .map(|name| match checks.definition(name) {
            Ok(definition) => run_check(&definition, &SystemClock, log),
            Err(err) => CheckOutcome {
                name: name.to_string(),
                status: Status::Unknown,
                message: err.to_string(),
                performance: None,
            },
        })
        .collect();

    CheckReport { outcomes }.render(mode);
}
