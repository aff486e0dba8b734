mod common;

use common::fixture;
use leadgate_core::domain::DatasetFormat;
use leadgate_store::{DatasetStore, SubmissionSource};
use std::fs;
use tempfile::TempDir;

fn store() -> DatasetStore {
    DatasetStore::open(fixture("submissions.csv"), DatasetFormat::Csv)
}

#[test]
fn find_duplicate_same_offer_returns_latest_for_offer() {
    let found = store()
        .find_duplicate_same_offer("351912345678", "OFR-100")
        .expect("query")
        .expect("match");
    assert_eq!(found.source_id(), "src-015");
    assert_eq!(found.offer_id(), "OFR-100");
    assert_eq!(found.telephone(), "351912345678");
    assert_eq!(
        found.created_at().map(|at| at.to_canonical()).as_deref(),
        Some("2024-03-12T09:15:00+00:00")
    );
}

#[test]
fn find_duplicate_same_offer_ignores_offer_case() {
    let found = store()
        .find_duplicate_same_offer("351912345678", "ofr-100")
        .expect("query")
        .expect("match");
    assert_eq!(found.source_id(), "src-015");
}

#[test]
fn find_duplicate_any_offer_returns_latest_overall() {
    let store = store();
    let found = store
        .find_duplicate_any_offer("3331112222")
        .expect("query")
        .expect("match");
    assert_eq!(found.telephone(), "3331112222");
    assert_eq!(found.source_id(), "src-020");

    let found = store
        .find_duplicate_any_offer("393331112222")
        .expect("query")
        .expect("match");
    assert_eq!(found.telephone(), "393331112222");
    assert_eq!(found.source_id(), "src-019");

    assert!(store
        .find_duplicate_any_offer("000000000")
        .expect("query")
        .is_none());
}

#[test]
fn load_all_normalizes_rows_and_skips_malformed_lines() {
    let records = store().load_all().expect("load");
    assert_eq!(records.len(), 21);
    assert!(records.iter().all(|record| record
        .telephone()
        .chars()
        .all(|ch| ch.is_ascii_digit())));
    assert!(records.iter().all(|record| record.source_id() != "src-021"));

    let quoted = records
        .iter()
        .find(|record| record.source_id() == "src-008")
        .expect("quoted row");
    assert_eq!(quoted.raw_telephone(), "+34 600, 123 456");
    assert_eq!(quoted.telephone(), "34600123456");
}

#[test]
fn load_all_canonicalizes_or_drops_timestamps() {
    let records = store().load_all().expect("load");
    let created = |id: &str| {
        records
            .iter()
            .find(|record| record.source_id() == id)
            .expect("row")
            .created_at()
            .map(|at| at.to_canonical())
    };
    assert_eq!(created("src-004").as_deref(), Some("2024-01-08T13:20:00+00:00"));
    assert_eq!(created("src-005").as_deref(), Some("2024-01-10T16:00:00+00:00"));
    assert_eq!(created("src-006"), None);
    assert_eq!(created("src-017"), None);
}

#[test]
fn invalid_utf8_in_unused_column_does_not_fail_load() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("submissions.csv");
    let mut data = b"sourceId,offerId,telephone,createdAt,city\n".to_vec();
    data.extend_from_slice(b"src-1,OFR-1,+351 912 345 678,2024-01-01T00:00:00Z,S\xe3o Paulo\n");
    fs::write(&path, data).expect("write dataset");

    let store = DatasetStore::open(&path, DatasetFormat::Csv);
    let found = store
        .find_duplicate_same_offer("351912345678", "OFR-1")
        .expect("query")
        .expect("match");
    assert_eq!(found.source_id(), "src-1");
}
