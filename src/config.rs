//! Check configuration
//!
//! Checks are declared in a YAML file (`logparseconfig.yaml` by default)
//! under a top-level `configurations` map. TOML files with the same shape are
//! accepted too. Each entry is kept as a raw value when the file loads and
//! only deserialized and validated into a [`CheckDefinition`] when that check
//! is asked for, so a broken entry never takes its siblings down with it.
//!
//! ```yaml
//! configurations:
//!   apperrors:
//!     logfile: /var/log/app.log
//!     filter: ERROR
//!     dateage: 1d
//!     datecolumn: 0,1
//!     dateformat: "%Y-%m-%d %H:%M:%S"
//!     message: "[RESULT] errors in the last [DATEAGE]"
//!     critical:
//!       greaterthan: 10
//! ```

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use thiserror::Error;

use crate::core::models::{
    Age, AgeError, BoundaryRule, CheckDefinition, DateWindow, FileChecks, RESULT_TOKEN,
    ScanConfig,
};
use crate::core::services::date::{ColumnDate, DateExtractor, DateParser, ExpressionDate};

/// Config file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "logparseconfig.yaml";

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("could not read config file {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The YAML is malformed
    #[error("could not parse YAML in {path}: {source}")]
    Yaml {
        /// Config file
        path: PathBuf,
        /// Underlying error
        source: serde_yaml::Error,
    },

    /// The TOML is malformed
    #[error("could not parse TOML in {path}: {source}")]
    Toml {
        /// Config file
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// No check has that name
    #[error("could not find {0} in the list of known checks")]
    UnknownCheck(String),

    /// A check entry is inconsistent
    #[error("check '{check}': {reason}")]
    Invalid {
        /// Check name
        check: String,
        /// What is wrong
        reason: String,
    },
}

/// A parsed config file
#[derive(Debug, Default, Deserialize)]
pub struct ChecksFile {
    /// Named check entries, in file order, not yet validated
    #[serde(default)]
    pub configurations: IndexMap<String, Value>,
}

/// Date column(s), either a bare index or a comma-separated list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// `datecolumn: 3`
    Index(usize),
    /// `datecolumn: "0,1"`
    List(String),
}

impl ColumnSpec {
    /// The column indices written in the config
    pub fn indices(&self) -> Result<Vec<usize>, String> {
        match self {
            Self::Index(index) => Ok(vec![*index]),
            Self::List(list) => list
                .split(',')
                .map(|part| {
                    part.trim()
                        .parse::<usize>()
                        .map_err(|_| format!("invalid date column '{}'", part.trim()))
                })
                .collect(),
        }
    }
}

/// One check as written in the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckEntry {
    /// Log file to scan; entries without one are templates
    pub logfile: Option<PathBuf>,
    /// Regex lines must match
    pub filter: Option<String>,
    /// How far back to scan (`1d`, `12h`, `30m`)
    pub dateage: Option<String>,
    /// Date token indices
    pub datecolumn: Option<ColumnSpec>,
    /// Regex with one capture group holding the date
    pub dateexpression: Option<String>,
    /// chrono format of the date
    pub dateformat: Option<String>,
    /// Skip lines with unreadable dates
    pub dateignoreerrors: bool,
    /// Replace parsed years with the current one
    pub dateignoreyear: bool,
    /// Look for dates on every line
    pub datesearchall: bool,
    /// Column to average
    #[serde(deserialize_with = "lenient_number")]
    pub avgcolumn: Option<usize>,
    /// Maximum age of the file's mtime
    pub stalealert: Option<String>,
    /// Report empty files; any value but `false` turns this on
    #[serde(deserialize_with = "present_unless_false")]
    pub nullalert: bool,
    /// Maximum file size in MB
    #[serde(deserialize_with = "lenient_number")]
    pub sizealert: Option<u64>,
    /// Warning boundary
    pub warning: Option<BoundaryEntry>,
    /// Critical boundary
    pub critical: Option<BoundaryEntry>,
    /// Default status message
    pub message: Option<String>,
    /// Append performance data
    pub performancedata: bool,
    /// Report UNKNOWN as CRITICAL
    pub unknownascritical: bool,
}

/// A warning or critical boundary as written in the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BoundaryEntry {
    /// Regex the result must match from its start
    pub expression: Option<String>,
    /// Fire when the result is below this
    #[serde(deserialize_with = "lenient_number")]
    pub lessthan: Option<f64>,
    /// Fire when the result is above this
    #[serde(deserialize_with = "lenient_number")]
    pub greaterthan: Option<f64>,
    /// Message override
    pub message: Option<String>,
}

impl ChecksFile {
    /// Load a config file; `.toml` files are read as TOML, anything else as YAML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Parse YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document is an empty config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Names of runnable checks (entries with a logfile), in file order
    #[must_use]
    pub fn check_names(&self) -> Vec<&str> {
        self.configurations
            .iter()
            .filter(|(_, entry)| has_logfile(entry))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Deserialize and validate the named check
    pub fn definition(&self, name: &str) -> Result<CheckDefinition, ConfigError> {
        let raw = self
            .configurations
            .get(name)
            .filter(|entry| has_logfile(entry))
            .ok_or_else(|| ConfigError::UnknownCheck(name.to_string()))?;

        let entry: CheckEntry =
            serde_yaml::from_value(raw.clone()).map_err(|err| ConfigError::Invalid {
                check: name.to_string(),
                reason: err.to_string(),
            })?;
        entry.materialize(name)
    }
}

fn has_logfile(entry: &Value) -> bool {
    entry.get("logfile").is_some_and(|logfile| !logfile.is_null())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Accept a number written either bare (`5`) or quoted (`"5"`)
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(number)) => Ok(Some(number)),
        Some(NumberOrText::Text(text)) => text.trim().parse().map(Some).map_err(|err| {
            serde::de::Error::custom(format!("expected a number but got '{text}': {err}"))
        }),
    }
}

/// A flag that is on whenever the key is present, even without a value
fn present_unless_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(!matches!(Value::deserialize(deserializer)?, Value::Bool(false)))
}

impl CheckEntry {
    /// Validate this entry into a [`CheckDefinition`]
    pub fn materialize(&self, name: &str) -> Result<CheckDefinition, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            check: name.to_string(),
            reason,
        };

        let logfile = self.logfile.clone().ok_or_else(|| invalid("missing logfile".to_string()))?;
        let message = self.message.clone().unwrap_or_else(|| RESULT_TOKEN.to_string());

        let filter = self
            .filter
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
            .map(Regex::new)
            .transpose()
            .map_err(|err| invalid(format!("invalid filter: {err}")))?;

        let file_checks = FileChecks {
            stale_after: self
                .stalealert
                .as_deref()
                .map(|age| parse_age("stalealert", age).map(Age::as_delta))
                .transpose()
                .map_err(invalid)?,
            alert_on_empty: self.nullalert,
            max_size: self.sizealert.map(|mb| mb.saturating_mul(BYTES_PER_MB)),
        };

        Ok(CheckDefinition {
            name: name.to_string(),
            logfile,
            scan: ScanConfig {
                filter,
                date: self.date_window().map_err(invalid)?,
                average_column: self.avgcolumn,
                file_checks,
            },
            warning: boundary(self.warning.as_ref(), &message)
                .map_err(|err| invalid(format!("warning: {err}")))?,
            critical: boundary(self.critical.as_ref(), &message)
                .map_err(|err| invalid(format!("critical: {err}")))?,
            message,
            performance_data: self.performancedata,
            unknown_as_critical: self.unknownascritical,
        })
    }

    fn date_window(&self) -> Result<Option<DateWindow>, String> {
        let Some(age) = self.dateage.as_deref() else {
            return Ok(None);
        };
        let age = parse_age("dateage", age)?;

        let extractor: Box<dyn DateExtractor> = match (&self.datecolumn, &self.dateexpression) {
            (Some(columns), None) => {
                let indices = columns.indices()?;
                Box::new(
                    ColumnDate::new(&indices)
                        .ok_or("datecolumn needs one or two column indices")?,
                )
            },
            (None, Some(expression)) => {
                let regex = Regex::new(expression)
                    .map_err(|err| format!("invalid dateexpression: {err}"))?;
                Box::new(
                    ExpressionDate::new(regex)
                        .ok_or("dateexpression needs exactly one capture group")?,
                )
            },
            (Some(_), Some(_)) => {
                return Err("set either datecolumn or dateexpression, not both".to_string());
            },
            (None, None) => {
                return Err("dateage requires a datecolumn or dateexpression".to_string());
            },
        };

        let format = self.dateformat.as_deref().ok_or("dateage requires a dateformat")?;

        Ok(Some(DateWindow {
            age,
            extractor,
            parser: DateParser::new(format, self.dateignoreyear),
            ignore_errors: self.dateignoreerrors,
            search_all: self.datesearchall,
        }))
    }
}

fn parse_age(key: &str, value: &str) -> Result<Age, String> {
    Age::parse(value).map_err(|err: AgeError| format!("invalid {key}: {err}"))
}

fn boundary(entry: Option<&BoundaryEntry>, default_message: &str) -> Result<BoundaryRule, String> {
    let Some(entry) = entry else {
        return Ok(BoundaryRule::Disabled);
    };
    let message = entry.message.as_deref().unwrap_or(default_message);

    if let Some(expression) = &entry.expression {
        BoundaryRule::regex(expression, message).map_err(|err| format!("invalid expression: {err}"))
    } else if let Some(threshold) = entry.lessthan {
        Ok(BoundaryRule::less_than(threshold, message))
    } else if let Some(threshold) = entry.greaterthan {
        Ok(BoundaryRule::greater_than(threshold, message))
    } else {
        Err("a boundary needs an 'expression', 'lessthan' or 'greaterthan' value".to_string())
    }
}

/// Pick the config file: the explicit path, else the default name in the
/// working directory, else the default name next to the executable
#[must_use]
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE)))
        .filter(|candidate| candidate.exists())
        .unwrap_or(local)
}
