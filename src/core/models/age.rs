//! Age durations written as `<int>[d|h|m]`
//!
//! Used for both `dateage` (how far back a scan may look) and `stalealert`
//! (how old the file's mtime may be).

use chrono::TimeDelta;
use thiserror::Error;

/// Errors from parsing an age string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    /// Empty input
    #[error("empty age")]
    Empty,

    /// Suffix was not `d`, `h` or `m`
    #[error("could not parse '{0}' into a valid days (d), hours (h) or minutes (m) age")]
    InvalidUnit(String),

    /// Amount before the suffix was not a non-negative integer
    #[error("invalid amount in age '{0}'")]
    InvalidAmount(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgeUnit {
    Days,
    Hours,
    Minutes,
}

impl AgeUnit {
    const fn suffix(self) -> char {
        match self {
            Self::Days => 'd',
            Self::Hours => 'h',
            Self::Minutes => 'm',
        }
    }
}

/// A duration such as `1d`, `12h` or `30m`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    amount: u32,
    unit: AgeUnit,
}

impl Age {
    /// Parse an age string (`1d`, `12h`, `30m`)
    pub fn parse(input: &str) -> Result<Self, AgeError> {
        let input = input.trim();
        let unit_char = input.chars().last().ok_or(AgeError::Empty)?;
        let unit = match unit_char.to_ascii_lowercase() {
            'd' => AgeUnit::Days,
            'h' => AgeUnit::Hours,
            'm' => AgeUnit::Minutes,
            _ => return Err(AgeError::InvalidUnit(input.to_string())),
        };

        let amount = input[..input.len() - unit_char.len_utf8()]
            .trim()
            .parse::<u32>()
            .map_err(|_| AgeError::InvalidAmount(input.to_string()))?;

        Ok(Self { amount, unit })
    }

    /// The age as a chrono duration
    #[must_use]
    pub fn as_delta(self) -> TimeDelta {
        let amount = i64::from(self.amount);
        match self.unit {
            AgeUnit::Days => TimeDelta::days(amount),
            AgeUnit::Hours => TimeDelta::hours(amount),
            AgeUnit::Minutes => TimeDelta::minutes(amount),
        }
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}
