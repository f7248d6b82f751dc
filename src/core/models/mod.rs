//! Domain models for logcheck
//!
//! Pure data structures; the only I/O here is [`LogFile::inspect`].
//!
//! - [`CheckDefinition`] - a validated, named check
//! - [`ScanConfig`] - what a bottom-up scan looks for
//! - [`BoundaryRule`] - a warning or critical threshold
//! - [`Status`] - OK, WARNING, CRITICAL or UNKNOWN
//! - [`Age`] - durations such as `1d` or `30m`

mod age;
mod boundary;
mod check_definition;
mod log_file;
mod scan;
mod status;

pub use age::{Age, AgeError};
pub use boundary::{BoundaryError, BoundaryRule};
pub use check_definition::{CheckDefinition, DATEAGE_TOKEN, LOGFILE_TOKEN, RESULT_TOKEN};
pub use log_file::LogFile;
pub use scan::{
    DateWindow, FileChecks, ScanConfig, ScanError, ScanIssue, ScanReport, ScanValue,
};
pub use status::Status;
