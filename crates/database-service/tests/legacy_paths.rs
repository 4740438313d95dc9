//! Legacy `business::models` paths name the same types as `domain::models`.

use database_service::business::models::email_record::EmailRecord as LegacyEmailRecord;
use database_service::business::models::report::Report as LegacyReport;
use database_service::domain::models::email_record::EmailRecord;
use database_service::domain::models::report::Report;
use database_service::forwards::{self, FORWARDS, Forward};
use database_service::ImportError;
use std::any::TypeId;
use time::macros::datetime;

fn sample_record(id: u64, sender: &str) -> EmailRecord {
    EmailRecord::new(
        id,
        format!("<{id}@mail.example.com>"),
        sender,
        vec!["ops@example.com".to_string()],
        "Quarterly numbers",
        datetime!(2026-03-02 09:30:00 UTC),
    )
    .expect("valid record")
}

#[test]
fn legacy_and_canonical_paths_are_the_same_types() {
    assert_eq!(TypeId::of::<LegacyEmailRecord>(), TypeId::of::<EmailRecord>());
    assert_eq!(TypeId::of::<LegacyReport>(), TypeId::of::<Report>());
    assert_eq!(
        TypeId::of::<database_service::EmailRecord>(),
        TypeId::of::<EmailRecord>()
    );
    assert_eq!(TypeId::of::<database_service::Report>(), TypeId::of::<Report>());
}

#[test]
fn values_move_freely_between_paths() {
    let legacy: LegacyEmailRecord = sample_record(7, "alice@example.com");
    let canonical: EmailRecord = legacy.clone();
    assert_eq!(canonical, legacy);

    let report: LegacyReport =
        Report::from_records("Daily", &[canonical], datetime!(2026-03-03 00:00:00 UTC))
            .expect("report");
    assert_eq!(report.total_records(), 1);
    assert_eq!(report.sender_counts.get("alice@example.com"), Some(&1));
}

#[test]
fn registry_verifies_on_load() {
    assert_eq!(forwards::ensure_loaded(), Ok(()));
    // Cached result is stable.
    assert_eq!(forwards::ensure_loaded(), Ok(()));
    assert_eq!(forwards::verify_all(FORWARDS), Ok(()));
}

#[test]
fn lookup_accepts_any_separator_style() {
    for path in [
        "business::models::email_record",
        "crate::business::models::email_record",
        "business/models/email_record",
        "business.models.email_record",
        "services/database-service/src/business/models/email_record",
        "services/database-service/src/business/models/email_record.rs",
        "database_service::business::models::email_record",
    ] {
        let forward =
            forwards::lookup(path, "EmailRecord").unwrap_or_else(|e| panic!("{path}: {e}"));
        assert_eq!(forward.canonical, "domain::models::email_record");
        assert_eq!((forward.legacy_type)(), TypeId::of::<EmailRecord>());
    }

    let report = forwards::lookup("business/models/report", "Report").expect("report forward");
    assert_eq!((report.canonical_type)(), TypeId::of::<Report>());
}

#[test]
fn lookup_rejects_unknown_paths() {
    let err = forwards::lookup("business/models/invoice", "Invoice").expect_err("unknown path");
    assert_eq!(
        err,
        ImportError::UnknownLegacyPath("business/models/invoice".to_string())
    );

    // Canonical modules are not legacy paths.
    let err = forwards::lookup("domain/models/report", "Report").expect_err("canonical path");
    assert!(matches!(err, ImportError::UnknownLegacyPath(_)));
}

#[test]
fn lookup_rejects_symbols_the_path_does_not_export() {
    let err = forwards::lookup("business/models/report", "EmailRecord").expect_err("wrong symbol");
    assert_eq!(
        err,
        ImportError::SymbolNotExported {
            legacy: "business::models::report".to_string(),
            symbol: "EmailRecord".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "legacy path business::models::report does not export EmailRecord"
    );
}

#[test]
fn forward_pointing_at_an_old_location_is_stale() {
    // Same type, but the recorded canonical module no longer defines it.
    let moved = Forward {
        legacy: "business::models::report",
        canonical: "domain::reports",
        symbol: "Report",
        legacy_type: || TypeId::of::<LegacyReport>(),
        canonical_type: || TypeId::of::<Report>(),
        resolved_name: std::any::type_name::<LegacyReport>,
    };

    let err = moved.verify().expect_err("stale");
    match err {
        ImportError::StaleForward {
            legacy,
            canonical,
            symbol,
            resolved,
        } => {
            assert_eq!(legacy, "business::models::report");
            assert_eq!(canonical, "domain::reports");
            assert_eq!(symbol, "Report");
            assert!(resolved.ends_with("domain::models::report::Report"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn forked_type_is_stale() {
    let forked = Forward {
        legacy: "business::models::email_record",
        canonical: "domain::models::email_record",
        symbol: "EmailRecord",
        legacy_type: || TypeId::of::<Report>(),
        canonical_type: || TypeId::of::<EmailRecord>(),
        resolved_name: std::any::type_name::<EmailRecord>,
    };
    assert!(matches!(
        forked.verify(),
        Err(ImportError::StaleForward { .. })
    ));
}

#[test]
fn verify_all_reports_the_first_stale_entry() {
    let stale = |canonical: &'static str| Forward {
        legacy: "business::models::report",
        canonical,
        symbol: "Report",
        legacy_type: || TypeId::of::<Report>(),
        canonical_type: || TypeId::of::<Report>(),
        resolved_name: std::any::type_name::<Report>,
    };
    let entries = [FORWARDS[0], stale("domain::first"), stale("domain::second")];

    match forwards::verify_all(&entries) {
        Err(ImportError::StaleForward { canonical, .. }) => assert_eq!(canonical, "domain::first"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn legacy_paths_lists_each_module_once() {
    let paths: Vec<&str> = forwards::legacy_paths().collect();
    assert_eq!(
        paths,
        vec!["business::models::email_record", "business::models::report"]
    );
}

#[test]
fn records_serialize_identically_through_either_path() {
    let record: LegacyEmailRecord = sample_record(1, "bob@example.org");
    let json = serde_json::to_string(&record).expect("serialize");
    assert!(json.contains("\"received_at\":\"2026-03-02T09:30:00Z\""));

    let back: EmailRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, record);
    assert_eq!(back.sender_domain(), "example.org");
}
