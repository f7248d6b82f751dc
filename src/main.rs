//! logcheck - a Nagios/NRPE plugin that scans log files bottom-up
//!
//! Prints one status line per check and exits with the Nagios status code.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;
mod commands;

use logcheck::core::models::Status;

/// Main entry point for the logcheck CLI
fn main() {
    let code = cli::run().unwrap_or_else(|err| {
        println!("{}: {err}", Status::Unknown);
        Status::Unknown.exit_code()
    });
    std::process::exit(code);
}
