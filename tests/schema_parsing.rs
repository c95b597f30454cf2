//! Schema Parsing Tests
//!
//! Parses the fixture catalogue and checks definitions, range expansion and
//! the issues reported for damaged lines.

use std::path::Path;

use lts_schema::range::RangeError;
use lts_schema::{ParseIssueKind, ParseReport, SchemaError, SchemaStore, ValidationRegistry};

const FIXTURE: &str = include_str!("fixtures/lts_vars.conf");

fn fixture_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/lts_vars.conf").leak()
}

fn parse_fixture() -> ParseReport {
    SchemaStore::parse_str(FIXTURE, &ValidationRegistry::new())
}

// =============================================================================
// Definitions
// =============================================================================

#[test]
fn test_fixture_counts() {
    let report = parse_fixture();
    // 14 plain + 9 crontab + 3 screen + 2 rcfile
    assert_eq!(report.store.len(), 28);
    assert_eq!(report.issues.len(), 5);
}

#[test]
fn test_plain_definition_fields() {
    let report = parse_fixture();
    let server = report.store.by_name("SERVER").unwrap();
    assert_eq!(server.data_type, "ip address");
    assert_eq!(server.default, "192.168.0.254");
    assert_eq!(
        server.description,
        "IP address of the LTSP server.\nUsed for every service that is not given its own address."
    );
    assert_eq!(report.store.by_index(0).unwrap(), server);
}

#[test]
fn test_insertion_order() {
    let report = parse_fixture();
    let names = report.store.names();
    assert_eq!(&names[..3], ["SERVER", "SOUND", "SOUND_DAEMON"]);
    assert_eq!(&names[14..17], ["CRONTAB_01", "CRONTAB_02", "CRONTAB_03"]);
    assert_eq!(names.last().copied(), Some("RCFILE_2"));
}

#[test]
fn test_contains_matches_by_name() {
    let report = parse_fixture();
    for name in ["SERVER", "CRONTAB_09", "SCREEN_04", "CRONTAB_10", "SCREEN_05", "MONITOR_MODEL", ""] {
        assert_eq!(report.store.contains(name), report.store.by_name(name).is_ok(), "{}", name);
    }
}

#[test]
fn test_by_index_agrees_with_by_name() {
    let report = parse_fixture();
    for (i, var) in report.store.iter().enumerate() {
        assert_eq!(report.store.by_index(i).unwrap(), var);
        assert_eq!(report.store.by_name(&var.name).unwrap(), var);
    }
    assert!(matches!(
        report.store.by_index(report.store.len()),
        Err(SchemaError::IndexOutOfRange { .. })
    ));
}

// =============================================================================
// Range Expansion
// =============================================================================

#[test]
fn test_crontab_range() {
    let report = parse_fixture();
    let crontabs: Vec<_> = report
        .store
        .iter()
        .filter(|v| v.name.starts_with("CRONTAB_"))
        .collect();

    assert_eq!(crontabs.len(), 9);
    assert_eq!(crontabs[0].name, "CRONTAB_01");
    assert_eq!(crontabs[8].name, "CRONTAB_09");
    for var in crontabs {
        assert_eq!(var.data_type, "string");
        assert_eq!(var.default, "unset");
        assert_eq!(var.description, "Line added to the client crontab.");
    }
}

#[test]
fn test_narrow_ranges() {
    let report = parse_fixture();
    assert!(report.store.contains("SCREEN_02"));
    assert!(report.store.contains("SCREEN_04"));
    assert!(!report.store.contains("SCREEN_05"));
    assert!(report.store.contains("RCFILE_1"));
    assert!(report.store.contains("RCFILE_2"));
    assert!(!report.store.contains("RCFILE_3"));
}

// =============================================================================
// Reported Issues
// =============================================================================

#[test]
fn test_issue_lines_and_kinds() {
    let report = parse_fixture();
    let lines: Vec<usize> = report.issues.iter().map(|i| i.line).collect();
    assert_eq!(lines, vec![26, 27, 28, 29, 30]);

    assert_eq!(report.issues[0].kind, ParseIssueKind::MalformedLine);
    assert_eq!(report.issues[1].kind, ParseIssueKind::MalformedTypeDefault);
    assert_eq!(
        report.issues[2].kind,
        ParseIssueKind::UnknownDataType("monitor model".to_string())
    );
    assert!(matches!(
        report.issues[3].kind,
        ParseIssueKind::Range(RangeError::InvalidNames { .. })
    ));
    assert!(matches!(
        report.issues[4].kind,
        ParseIssueKind::Range(RangeError::InvalidNumber { .. })
    ));
}

#[test]
fn test_skipped_lines_produce_nothing() {
    let report = parse_fixture();
    for name in ["PRINTER_0_DEVICE", "PRINTER_0_PORT", "MONITOR_MODEL", "XKBLAYOUT_1", "USB_A"] {
        assert!(!report.store.contains(name), "{} should be skipped", name);
    }
}

#[test]
fn test_registered_type_becomes_parseable() {
    use lts_schema::{RawValue, TypeRule, Violation};

    struct MonitorModel;

    impl TypeRule for MonitorModel {
        fn check(&self, value: RawValue<'_>) -> Result<(), Violation> {
            match value.as_text() {
                Some(s) if !s.is_empty() => Ok(()),
                _ => Err(Violation::new("monitor model must not be empty")),
            }
        }
    }

    let mut registry = ValidationRegistry::new();
    registry.register("monitor model", MonitorModel);

    let report = SchemaStore::parse_str(FIXTURE, &registry);
    assert_eq!(report.issues.len(), 4);
    assert!(report.store.contains("MONITOR_MODEL"));
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_reparse_is_idempotent() {
    let first = parse_fixture();
    let second = parse_fixture();
    assert_eq!(first.store, second.store);
    assert_eq!(first.issues, second.issues);
    assert_eq!(first.store.fingerprint(), second.store.fingerprint());
}

#[test]
fn test_load_from_file_matches_text() {
    let registry = ValidationRegistry::new();
    let loaded = SchemaStore::load(fixture_path(), &registry).unwrap();
    assert_eq!(loaded.store, parse_fixture().store);
}

#[test]
fn test_load_missing_file() {
    let registry = ValidationRegistry::new();
    let result = SchemaStore::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/absent.conf"), &registry);
    assert!(matches!(result, Err(SchemaError::Io(_))));
}

#[test]
fn test_tooltip_and_default_lookup() {
    let report = parse_fixture();
    assert_eq!(report.store.default_for("NBD_PORT"), Some("2000"));
    assert_eq!(
        report.store.description("LOCAL_APPS_MENU_ITEMS"),
        Some("Comma separated list of local applications.\nRequires LOCAL_APPS.")
    );
    assert_eq!(report.store.description("UNKNOWN"), None);
}

#[test]
fn test_serialize_definitions() {
    let report = parse_fixture();
    let json = serde_json::to_value(report.store.by_name("NBD_PORT").unwrap()).unwrap();
    assert_eq!(json["data_type"], "port");
    assert_eq!(json["default"], "2000");
}
