//! Port traits (interfaces) for external dependencies
//!
//! The scanner depends on these traits rather than on the system clock or a
//! global logger, so a scan can be driven deterministically from tests.
//!
//! - [`Clock`] - where "now" comes from
//! - [`ScanLog`] - where scan diagnostics go

mod clock;
mod scan_log;

pub use clock::{Clock, FixedClock, SystemClock};
pub use scan_log::{LogFacade, ScanLog, Silent};
