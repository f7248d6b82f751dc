//! Date extraction and parsing for log lines
//!
//! A [`DateExtractor`] finds the date substring in a raw line; a
//! [`DateParser`] turns it into a timestamp. The extractor is picked once when
//! the configuration is materialized.

use std::borrow::Cow;

use chrono::format::ParseErrorKind;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use thiserror::Error;

/// Reasons a line has no usable date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// A configured token index does not exist in the line
    #[error("date column {column} is out of range, the line has {tokens} column(s)")]
    ColumnOutOfRange {
        /// Requested zero-based column
        column: usize,
        /// Number of whitespace-separated tokens in the line
        tokens: usize,
    },

    /// The date expression did not match the line
    #[error("date expression did not match")]
    NoMatch,

    /// The extracted text does not fit the date format
    #[error("'{text}' does not match date format '{format}': {source}")]
    Parse {
        /// Extracted text
        text: String,
        /// Configured format
        format: String,
        /// Underlying chrono error
        source: chrono::ParseError,
    },

    /// The parsed date does not exist in the substituted year (Feb 29)
    #[error("'{text}' does not exist in year {year}")]
    InvalidYear {
        /// Extracted text
        text: String,
        /// Year that was substituted
        year: i32,
    },
}

/// Finds the date portion of a log line
pub trait DateExtractor: std::fmt::Debug + Send + Sync {
    /// Return the date substring of `line`
    fn extract<'a>(&self, line: &'a str) -> Result<Cow<'a, str>, DateError>;
}

/// Date taken from one or two whitespace-separated columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDate {
    first: usize,
    second: Option<usize>,
}

impl ColumnDate {
    /// Create a column extractor; `columns` holds one or two indices
    ///
    /// Returns `None` for an empty list or more than two indices.
    #[must_use]
    pub fn new(columns: &[usize]) -> Option<Self> {
        match *columns {
            [first] => Some(Self { first, second: None }),
            [first, second] => Some(Self {
                first,
                second: Some(second),
            }),
            _ => None,
        }
    }
}

impl DateExtractor for ColumnDate {
    fn extract<'a>(&self, line: &'a str) -> Result<Cow<'a, str>, DateError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let token = |column: usize| {
            tokens.get(column).copied().ok_or(DateError::ColumnOutOfRange {
                column,
                tokens: tokens.len(),
            })
        };

        let first = token(self.first)?;
        match self.second {
            None => Ok(Cow::Borrowed(first)),
            Some(second) => Ok(Cow::Owned(format!("{first} {}", token(second)?))),
        }
    }
}

/// Date taken from the single capture group of a regex
#[derive(Debug, Clone)]
pub struct ExpressionDate {
    expression: Regex,
}

impl ExpressionDate {
    /// Create an expression extractor
    ///
    /// Returns `None` unless the regex has exactly one capture group.
    #[must_use]
    pub fn new(expression: Regex) -> Option<Self> {
        // captures_len counts the implicit whole-match group
        (expression.captures_len() == 2).then_some(Self { expression })
    }
}

impl DateExtractor for ExpressionDate {
    fn extract<'a>(&self, line: &'a str) -> Result<Cow<'a, str>, DateError> {
        self.expression
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| Cow::Borrowed(m.as_str()))
            .ok_or(DateError::NoMatch)
    }
}

/// Parses extracted dates with a chrono `strftime` format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParser {
    format: String,
    ignore_year: bool,
}

impl DateParser {
    /// Create a parser
    #[must_use]
    pub fn new(format: impl Into<String>, ignore_year: bool) -> Self {
        Self {
            format: format.into(),
            ignore_year,
        }
    }

    /// Parse `text`; with `ignore_year` the result carries the cutoff's year
    pub fn parse(&self, text: &str, cutoff: NaiveDateTime) -> Result<NaiveDateTime, DateError> {
        let parse_error = |source| DateError::Parse {
            text: text.to_string(),
            format: self.format.clone(),
            source,
        };

        let parsed = match parse_date_time(text, &self.format) {
            Ok(parsed) => parsed,
            Err(err) if self.ignore_year && err.kind() == ParseErrorKind::NotEnough => {
                // format has no year field, supply one
                let with_year = format!("{text} {}", cutoff.year());
                let format = format!("{} %Y", self.format);
                parse_date_time(&with_year, &format).map_err(parse_error)?
            },
            Err(err) => return Err(parse_error(err)),
        };

        if !self.ignore_year {
            return Ok(parsed);
        }
        parsed.with_year(cutoff.year()).ok_or_else(|| DateError::InvalidYear {
            text: text.to_string(),
            year: cutoff.year(),
        })
    }
}

/// Parse a date-time, falling back to a date-only format at midnight
fn parse_date_time(text: &str, format: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format).or_else(|err| {
        NaiveDate::parse_from_str(text, format)
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| err)
    })
}
