//! logcheck - a Nagios/NRPE plugin for log files
//!
//! This library scans log files bottom-up, only as far back as a configured
//! age window, counts (or averages a column of) the lines that match a filter,
//! and classifies the result against warning and critical boundaries.

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

pub mod config;
pub mod core;
pub mod output;
