//! CLI definitions and entry point

use std::path::PathBuf;

use clap::Parser;

use crate::commands;
use logcheck::config::{self, ChecksFile};
use logcheck::core::ports::{LogFacade, ScanLog, Silent};
use logcheck::output::OutputMode;

/// logcheck - memory-efficient log file checks for Nagios
#[derive(Parser, Debug)]
#[command(
    name = "logcheck",
    version,
    about = "Memory-efficient log file checks for Nagios",
    long_about = "Scans log files bottom-up and reports a Nagios status.\n\n\
                  Only the part of a log within the configured age window is read,\n\
                  so even very large files are checked quickly.\n\
                  Checks are defined in a YAML config file."
)]
pub struct Cli {
    /// Run only this check (runs every check when omitted)
    #[arg(short, long)]
    pub check: Option<String>,

    /// List the runnable checks in the config file
    #[arg(short, long)]
    pub list: bool,

    /// Config file to use [default: logparseconfig.yaml]
    #[arg(short = 'y', long = "yamlconfig")]
    pub config: Option<PathBuf>,

    /// Log scan diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print an NRPE command line for every runnable check
    #[arg(short = 'g', long = "generatenrpe")]
    pub generate_nrpe: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI, returning the process exit code
pub fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let scan_log: &dyn ScanLog = if cli.verbose { &LogFacade } else { &Silent };

    let config_path = config::resolve_path(cli.config.as_deref());
    log::debug!("using config file {}", config_path.display());
    let checks = ChecksFile::load(&config_path)?;

    if cli.generate_nrpe {
        commands::nrpe(&checks, &config_path, output_mode)?;
        return Ok(0);
    }
    if cli.list {
        commands::list(&checks, &config_path, output_mode);
        return Ok(0);
    }

    match cli.check.as_deref() {
        Some(name) => commands::check_one(&checks, name, scan_log, output_mode),
        None => {
            commands::check_all(&checks, scan_log, output_mode);
            Ok(0)
        },
    }
}
