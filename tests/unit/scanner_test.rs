//! Scenario tests for the log scanner
//!
//! Logs are generated relative to a fixed clock, so every window boundary is
//! exact.

use logcheck::core::models::{Age, DateWindow, ScanConfig, ScanIssue, ScanValue};
use logcheck::core::ports::Silent;
use logcheck::core::services::{ColumnDate, DateParser, ExpressionDate, LogScanner};
use regex::Regex;

use super::common::{LogFixture, RecordingLog, STAMP_FORMAT, clock};

fn column_window(age: &str) -> DateWindow {
    DateWindow {
        age: Age::parse(age).unwrap(),
        extractor: Box::new(ColumnDate::new(&[0, 1]).unwrap()),
        parser: DateParser::new(STAMP_FORMAT, false),
        ignore_errors: false,
        search_all: false,
    }
}

/// Twelve lines, six hours apart, spanning three days
fn three_days() -> LogFixture {
    (0..12).fold(LogFixture::new(), |fixture, step| {
        let hours_ago = 70 - step * 6;
        let level = if step % 2 == 0 { "ERROR" } else { "INFO" };
        fixture.stamped(hours_ago, &format!("{level} event {step}"))
    })
}

#[test]
fn counts_lines_within_one_day() {
    let fixture = three_days();
    let path = fixture.write();
    let config = ScanConfig {
        date: Some(column_window("1d")),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let report = LogScanner::new(&config, &clock, &Silent).scan(&path).unwrap();

    // 22h, 16h, 10h and 4h ago are recent; the 28h line stops the scan
    assert_eq!(report.value, ScanValue::Count(4));
    assert_eq!(report.lines_read, 5);
    assert_eq!(report.issue, None);
}

#[test]
fn filter_and_window_combine() {
    let fixture = three_days();
    let path = fixture.write();
    let config = ScanConfig {
        filter: Some(Regex::new("ERROR").unwrap()),
        date: Some(column_window("36h")),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let report = LogScanner::new(&config, &clock, &Silent).scan(&path).unwrap();

    // ERROR lines at 34h, 22h and 10h ago; INFO lines are never dated
    assert_eq!(report.value, ScanValue::Count(3));
}

#[test]
fn window_wider_than_file_reads_everything() {
    let fixture = three_days();
    let path = fixture.write();
    let config = ScanConfig {
        date: Some(column_window("7d")),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let report = LogScanner::new(&config, &clock, &Silent).scan(&path).unwrap();
    assert_eq!(report.value, ScanValue::Count(12));
    assert_eq!(report.lines_read, 12);
}

#[test]
fn average_of_recent_values() {
    let fixture = LogFixture::new()
        .stamped(30, "latency 500")
        .stamped(3, "latency 10")
        .stamped(2, "latency 20")
        .stamped(1, "latency 30");
    let path = fixture.write();
    let config = ScanConfig {
        date: Some(column_window("1d")),
        average_column: Some(3),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let report = LogScanner::new(&config, &clock, &Silent).scan(&path).unwrap();
    assert_eq!(report.value, ScanValue::Average(20.0));
    assert_eq!(report.matched, 3);
}

#[test]
fn average_with_no_recent_lines_is_an_issue() {
    let fixture = LogFixture::new().stamped(48, "latency 500");
    let path = fixture.write();
    let config = ScanConfig {
        date: Some(column_window("1d")),
        average_column: Some(3),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let report = LogScanner::new(&config, &clock, &Silent).scan(&path).unwrap();
    assert_eq!(report.issue, Some(ScanIssue::NoAverage));
}

#[test]
fn expression_date_with_ignored_year() {
    let fixture = LogFixture::new()
        .line("Mar  8 09:00:00 host app: ERROR disk full")
        .line("Mar  9 23:00:00 host app: ERROR disk full")
        .line("Mar 10 09:00:00 host app: ERROR disk full")
        .line("Mar 10 11:00:00 host app: INFO all fine");
    let path = fixture.write();
    let config = ScanConfig {
        filter: Some(Regex::new("ERROR").unwrap()),
        date: Some(DateWindow {
            age: Age::parse("1d").unwrap(),
            extractor: Box::new(
                ExpressionDate::new(Regex::new(r"^(\w{3} +\d+ [\d:]+)").unwrap()).unwrap(),
            ),
            parser: DateParser::new("%b %d %H:%M:%S", true),
            ignore_errors: false,
            search_all: false,
        }),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let report = LogScanner::new(&config, &clock, &Silent).scan(&path).unwrap();
    assert_eq!(report.value, ScanValue::Count(2));
}

#[test]
fn scanning_twice_gives_the_same_report() {
    let fixture = three_days();
    let path = fixture.write();
    let config = ScanConfig {
        filter: Some(Regex::new("event").unwrap()),
        date: Some(column_window("2d")),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let scanner = LogScanner::new(&config, &clock, &Silent);
    assert_eq!(scanner.scan(&path).unwrap(), scanner.scan(&path).unwrap());
}

#[test]
fn chunk_size_does_not_change_the_result() {
    let fixture = three_days();
    let path = fixture.write();
    let config = ScanConfig {
        date: Some(column_window("1d")),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let expected = LogScanner::new(&config, &clock, &Silent).scan(&path).unwrap();
    for chunk_size in [1, 3, 16, 1 << 20] {
        let report = LogScanner::new(&config, &clock, &Silent)
            .with_chunk_size(chunk_size)
            .scan(&path)
            .unwrap();
        assert_eq!(report, expected, "chunk size {chunk_size}");
    }
}

#[test]
fn invalid_date_is_reported_to_the_log() {
    let fixture = LogFixture::new().stamped(1, "ok").line("not a dated line");
    let path = fixture.write();
    let config = ScanConfig {
        date: Some(column_window("1d")),
        ..ScanConfig::count_all()
    };

    let clock = clock();
    let log = RecordingLog::default();
    let report = LogScanner::new(&config, &clock, &log).scan(&path).unwrap();

    assert!(matches!(report.issue, Some(ScanIssue::InvalidDate { .. })));
    assert!(log.messages().iter().any(|m| m.starts_with("warn: ")));
}
