//! List the checks in a config file

use std::path::Path;

use logcheck::config::ChecksFile;
use logcheck::output::{CheckListResult, OutputMode};

/// Print the runnable check names
pub fn list(checks: &ChecksFile, config_path: &Path, mode: OutputMode) {
    CheckListResult {
        config: config_path.display().to_string(),
        checks: checks.check_names().into_iter().map(String::from).collect(),
    }
    .render(mode);
}
