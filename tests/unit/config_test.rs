//! Tests for loading check configuration files

use std::fs;

use logcheck::config::{ChecksFile, ConfigError};
use logcheck::core::models::{BoundaryRule, Status};
use logcheck::core::ports::Silent;
use logcheck::core::services::run_check;

use super::common::{LogFixture, clock};

fn write_config(fixture: &LogFixture, name: &str, content: &str) -> std::path::PathBuf {
    let path = fixture.dir().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn checks_keep_file_order_and_skip_templates() {
    let fixture = LogFixture::new();
    let path = write_config(
        &fixture,
        "checks.yaml",
        "configurations:\n  \
           zeta:\n    logfile: /var/log/z.log\n  \
           template:\n    filter: ERROR\n  \
           alpha:\n    logfile: /var/log/a.log\n",
    );

    let checks = ChecksFile::load(&path).unwrap();
    assert_eq!(checks.check_names(), ["zeta", "alpha"]);
    assert!(matches!(checks.definition("template"), Err(ConfigError::UnknownCheck(_))));
}

#[test]
fn badly_typed_entry_only_breaks_itself() {
    let fixture = LogFixture::new();
    let path = write_config(
        &fixture,
        "checks.yaml",
        "configurations:\n  \
           good:\n    logfile: /var/log/good.log\n    warning:\n      lessthan: \"5\"\n  \
           bad:\n    logfile: /var/log/bad.log\n    avgcolumn: three\n",
    );

    let checks = ChecksFile::load(&path).unwrap();
    assert_eq!(checks.check_names(), ["good", "bad"]);

    let good = checks.definition("good").unwrap();
    assert_eq!(good.warning.threshold(), Some(5.0));

    match checks.definition("bad") {
        Err(ConfigError::Invalid { check, reason }) => {
            assert_eq!(check, "bad");
            assert!(reason.contains("three"), "{reason}");
        },
        other => panic!("expected an invalid entry, got {other:?}"),
    }
}

#[test]
fn bare_nullalert_reports_empty_log() {
    let fixture = LogFixture::new();
    let log = fixture.dir().join("empty.log");
    fs::write(&log, "").unwrap();
    let path = write_config(
        &fixture,
        "checks.yaml",
        &format!("configurations:\n  c:\n    logfile: {}\n    nullalert:\n", log.display()),
    );

    let check = ChecksFile::load(&path).unwrap().definition("c").unwrap();
    assert!(check.scan.file_checks.alert_on_empty);

    let outcome = run_check(&check, &clock(), &Silent);
    assert_eq!(outcome.status, Status::Unknown);
    assert!(outcome.message.ends_with("is empty"));
}

#[test]
fn empty_file_has_no_checks() {
    let fixture = LogFixture::new();
    let path = write_config(&fixture, "checks.yaml", "");
    assert!(ChecksFile::load(&path).unwrap().check_names().is_empty());
}

#[test]
fn malformed_yaml_is_reported() {
    let fixture = LogFixture::new();
    let path = write_config(&fixture, "checks.yaml", "configurations: [unclosed\n");
    assert!(matches!(ChecksFile::load(&path), Err(ConfigError::Yaml { .. })));
}

#[test]
fn missing_file_is_reported() {
    let fixture = LogFixture::new();
    let err = ChecksFile::load(&fixture.dir().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn full_entry_materializes() {
    let fixture = LogFixture::new();
    let path = write_config(
        &fixture,
        "checks.yaml",
        r#"
configurations:
  apperrors:
    logfile: /var/log/app.log
    filter: ERROR
    dateage: 12h
    datecolumn: 0,1
    dateformat: "%Y-%m-%d %H:%M:%S"
    stalealert: 30m
    nullalert: true
    performancedata: true
    message: "[RESULT] errors in [DATEAGE]"
    warning:
      greaterthan: 5
      message: "[RESULT] errors"
    critical:
      expression: "[1-9][0-9]"
"#,
    );

    let check = ChecksFile::load(&path).unwrap().definition("apperrors").unwrap();
    assert_eq!(check.name, "apperrors");
    assert!(check.scan.filter.is_some());
    assert_eq!(check.scan.date.as_ref().unwrap().age.to_string(), "12h");
    assert!(check.scan.file_checks.alert_on_empty);
    assert_eq!(check.scan.file_checks.stale_after, Some(chrono::TimeDelta::minutes(30)));
    assert!(check.performance_data);
    assert_eq!(check.warning.threshold(), Some(5.0));
    assert!(matches!(check.critical, BoundaryRule::Regex { .. }));
    assert_eq!(check.critical.message(), Some("[RESULT] errors in [DATEAGE]"));
    assert_eq!(check.render_message(&check.message, "3"), "3 errors in 12h");
}

#[test]
fn both_date_locations_are_rejected() {
    let fixture = LogFixture::new();
    let path = write_config(
        &fixture,
        "checks.yaml",
        "configurations:\n  c:\n    logfile: /x\n    dateage: 1d\n    datecolumn: 0\n    \
         dateexpression: '(\\d+)'\n    dateformat: '%s'\n",
    );
    let err = ChecksFile::load(&path).unwrap().definition("c").unwrap_err();
    assert!(err.to_string().contains("not both"));
}

#[test]
fn invalid_age_is_rejected() {
    let fixture = LogFixture::new();
    let path = write_config(
        &fixture,
        "checks.yaml",
        "configurations:\n  c:\n    logfile: /x\n    stalealert: 5w\n",
    );
    let err = ChecksFile::load(&path).unwrap().definition("c").unwrap_err();
    assert!(err.to_string().contains("invalid stalealert"));
}

#[test]
fn toml_config_is_accepted() {
    let fixture = LogFixture::new();
    let path = write_config(
        &fixture,
        "checks.toml",
        "[configurations.errors]\nlogfile = \"/var/log/app.log\"\nfilter = \"ERROR\"\n\n\
         [configurations.errors.critical]\ngreaterthan = 1.0\n",
    );

    let check = ChecksFile::load(&path).unwrap().definition("errors").unwrap();
    assert_eq!(check.critical.threshold(), Some(1.0));
}

#[test]
fn loaded_check_runs_end_to_end() {
    let fixture = LogFixture::new()
        .stamped(30, "ERROR stale")
        .stamped(5, "ERROR one")
        .stamped(4, "INFO fine")
        .stamped(3, "ERROR two");
    let log = fixture.write();
    let config = format!(
        "configurations:\n  errors:\n    logfile: {}\n    filter: ERROR\n    dateage: 1d\n    \
         datecolumn: 0,1\n    dateformat: '%Y-%m-%d %H:%M:%S'\n    performancedata: true\n    \
         message: '[RESULT] errors in the last [DATEAGE]'\n    warning:\n      greaterthan: 1\n",
        log.display()
    );
    let path = write_config(&fixture, "checks.yaml", &config);

    let check = ChecksFile::load(&path).unwrap().definition("errors").unwrap();
    let outcome = run_check(&check, &clock(), &Silent);

    assert_eq!(outcome.status, Status::Warning);
    assert_eq!(outcome.message, "2 errors in the last 1d");
    assert_eq!(outcome.performance.as_deref(), Some("'errors'=2;1"));
}
