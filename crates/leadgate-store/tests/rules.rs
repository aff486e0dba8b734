mod common;

use chrono::{Duration, Utc};
use common::{fixture, write_with_mtime};
use leadgate_core::domain::{BlockReason, DatasetFormat};
use leadgate_core::rules::{RuleEngine, RulePolicy};
use leadgate_store::{DatasetStore, StoreErrorKind};
use tempfile::TempDir;

fn policy(any_offer: bool, throttle: u32) -> RulePolicy {
    RulePolicy {
        block_across_any_offer: any_offer,
        recent_throttle_minutes: throttle,
    }
}

fn fixture_store() -> DatasetStore {
    DatasetStore::open(fixture("submissions.csv"), DatasetFormat::Csv)
}

#[test]
fn duplicate_same_offer_blocks_with_any_toggles() {
    let store = fixture_store();
    for policy in [policy(false, 0), policy(true, 0), policy(true, 30)] {
        let decision = RuleEngine::new(&store, policy)
            .evaluate("OFR-100", "351912345678")
            .expect("evaluate");
        assert!(decision.is_blocked());
        assert_eq!(decision.reason(), Some(BlockReason::DuplicateTelephoneOffer));
        assert_eq!(decision.matched().expect("match").source_id(), "src-015");
    }
}

#[test]
fn any_offer_duplicate_only_when_enabled() {
    let store = fixture_store();
    let decision = RuleEngine::new(&store, policy(false, 0))
        .evaluate("OFR-XYZ", "351912345678")
        .expect("evaluate");
    assert!(!decision.is_blocked());

    let decision = RuleEngine::new(&store, policy(true, 0))
        .evaluate("OFR-XYZ", "351912345678")
        .expect("evaluate");
    assert_eq!(
        decision.reason(),
        Some(BlockReason::DuplicateTelephoneAnyOffer)
    );
    assert_eq!(decision.matched().expect("match").source_id(), "src-018");
}

#[test]
fn throttle_outside_window_does_not_block() {
    let store = fixture_store();
    let decision = RuleEngine::new(&store, policy(false, 30))
        .evaluate("OFR-XYZ", "351912345678")
        .expect("evaluate");
    assert!(!decision.is_blocked());
}

#[test]
fn throttle_blocks_recent_submission() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("submissions.csv");
    let three_minutes_ago = (Utc::now() - Duration::minutes(3)).to_rfc3339();
    let an_hour_ago = (Utc::now() - Duration::minutes(60)).to_rfc3339();
    write_with_mtime(
        &path,
        &format!(
            "sourceId,offerId,telephone,createdAt\n\
             src-old,OFR-1,+351 912 345 678,{an_hour_ago}\n\
             src-new,OFR-2,351912345678,{three_minutes_ago}\n\
             src-other,OFR-2,351900000000,{three_minutes_ago}\n"
        ),
        1_700_000_000,
    );
    let store = DatasetStore::open(&path, DatasetFormat::Csv);

    let decision = RuleEngine::new(&store, policy(false, 5))
        .evaluate("OFR-XYZ", "351912345678")
        .expect("evaluate");
    assert_eq!(decision.reason(), Some(BlockReason::RecentThrottle));
    assert_eq!(decision.matched().expect("match").source_id(), "src-new");

    let decision = RuleEngine::new(&store, policy(false, 1))
        .evaluate("OFR-XYZ", "351912345678")
        .expect("evaluate");
    assert!(!decision.is_blocked());
}

#[test]
fn dataset_errors_propagate_through_engine() {
    let temp = TempDir::new().expect("temp dir");
    let store = DatasetStore::open(temp.path().join("absent.csv"), DatasetFormat::Csv);
    let err = RuleEngine::new(&store, policy(true, 10))
        .evaluate("OFR-100", "351912345678")
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::DatasetUnavailable);
}
