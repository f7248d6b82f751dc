//! Generate NRPE command definitions

use std::path::Path;

use logcheck::config::ChecksFile;
use logcheck::output::{NrpeResult, OutputMode};

/// Print one `command[<name>]=...` line per runnable check
pub fn nrpe(checks: &ChecksFile, config_path: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let program = std::env::current_exe()?;
    let config = config_path.canonicalize().unwrap_or_else(|_| config_path.to_path_buf());

    let commands = checks
        .check_names()
        .into_iter()
        .map(|name| nrpe_line(name, &program, &config))
        .collect();

    NrpeResult {
        generator: program.display().to_string(),
        commands,
    }
    .render(mode);
    Ok(())
}

fn nrpe_line(name: &str, program: &Path, config: &Path) -> String {
    format!("command[{name}]={} -y {} -c {name}", program.display(), config.display())
}
