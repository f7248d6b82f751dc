//! Scanning and evaluation services
//!
//! - [`reverse_reader`] - read a file's lines last-first in fixed-size chunks
//! - [`date`] - find and parse the timestamp of a log line
//! - [`scanner`] - bounded-lookback scan producing a count or an average
//! - [`evaluator`] - classify a scan result into a status line

pub mod date;
pub mod evaluator;
pub mod reverse_reader;
pub mod scanner;

pub use date::{ColumnDate, DateError, DateExtractor, DateParser, ExpressionDate};
pub use evaluator::{CheckOutcome, classify, evaluate, judge, performance_data, run_check};
pub use reverse_reader::{DEFAULT_CHUNK_SIZE, ReverseLineReader};
pub use scanner::LogScanner;
