//! Warning and critical boundaries
//!
//! A boundary decides whether a scan result is "in a bad state". Each check
//! carries two of them and consults the critical one first.

use regex::Regex;
use thiserror::Error;

/// Errors raised while classifying a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    /// A numeric rule was configured but the value is not a number
    #[error("expected a numerical value but got '{0}'")]
    NotNumeric(String),
}

/// A single boundary rule
#[derive(Debug, Clone)]
pub enum BoundaryRule {
    /// Never fires
    Disabled,
    /// Fires when the value matches the pattern from its first character
    Regex {
        /// Pattern anchored at the start of the value
        pattern: Regex,
        /// Message reported when the rule fires
        message: String,
    },
    /// Fires when the value is below the threshold
    LessThan {
        /// Threshold
        threshold: f64,
        /// Message reported when the rule fires
        message: String,
    },
    /// Fires when the value is above the threshold
    GreaterThan {
        /// Threshold
        threshold: f64,
        /// Message reported when the rule fires
        message: String,
    },
}

impl BoundaryRule {
    /// Build a regex rule, anchoring `pattern` at the start of the value
    pub fn regex(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"\A(?:{pattern})"))?;
        Ok(Self::Regex {
            pattern,
            message: message.into(),
        })
    }

    /// Build a less-than rule
    #[must_use]
    pub fn less_than(threshold: f64, message: impl Into<String>) -> Self {
        Self::LessThan {
            threshold,
            message: message.into(),
        }
    }

    /// Build a greater-than rule
    #[must_use]
    pub fn greater_than(threshold: f64, message: impl Into<String>) -> Self {
        Self::GreaterThan {
            threshold,
            message: message.into(),
        }
    }

    /// Whether `value` is in a bad state according to this rule
    pub fn in_bad_state(&self, value: &str) -> Result<bool, BoundaryError> {
        match self {
            Self::Disabled => Ok(false),
            Self::Regex { pattern, .. } => Ok(pattern.is_match(value)),
            Self::LessThan { threshold, .. } => Ok(numeric(value)? < *threshold),
            Self::GreaterThan { threshold, .. } => Ok(numeric(value)? > *threshold),
        }
    }

    /// Numeric threshold for performance data
    #[must_use]
    pub const fn threshold(&self) -> Option<f64> {
        match self {
            Self::LessThan { threshold, .. } | Self::GreaterThan { threshold, .. } => {
                Some(*threshold)
            },
            Self::Disabled | Self::Regex { .. } => None,
        }
    }

    /// Message reported when this rule fires
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Disabled => None,
            Self::Regex { message, .. }
            | Self::LessThan { message, .. }
            | Self::GreaterThan { message, .. } => Some(message),
        }
    }
}

fn numeric(value: &str) -> Result<f64, BoundaryError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| BoundaryError::NotNumeric(value.to_string()))
}
