//! Check status levels
//!
//! Nagios plugins report one of four states. `Ok`, `Warning` and `Critical`
//! form an ordered scale; `Unknown` sits outside it and compares with nothing
//! but itself.

use std::cmp::Ordering;

use serde::Serialize;

/// Outcome level of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Nothing to report
    #[default]
    Ok,
    /// The warning boundary fired
    Warning,
    /// The critical boundary fired
    Critical,
    /// The check could not produce a trustworthy result
    Unknown,
}

impl Status {
    /// Process exit code expected by Nagios/NRPE
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// Label used at the start of a status line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    const fn rank(self) -> Option<u8> {
        match self {
            Self::Ok => Some(0),
            Self::Warning => Some(1),
            Self::Critical => Some(2),
            Self::Unknown => None,
        }
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
