use crate::domain::SubmissionRecord;
use chrono::{DateTime, Utc};

/// Picks the most recent record. Records without a timestamp rank below any
/// timestamped record; among equal timestamps the first one seen wins.
pub fn latest_match<'a, I>(candidates: I) -> Option<&'a SubmissionRecord>
where
    I: IntoIterator<Item = &'a SubmissionRecord>,
{
    candidates
        .into_iter()
        .fold(None, |best, candidate| Some(select_latest(best, candidate)))
}

pub fn duplicate_same_offer<'a>(
    records: &'a [SubmissionRecord],
    normalized_phone: &str,
    offer_id: &str,
) -> Option<&'a SubmissionRecord> {
    latest_match(
        records
            .iter()
            .filter(|record| record.telephone() == normalized_phone)
            .filter(|record| record.matches_offer(offer_id)),
    )
}

pub fn duplicate_any_offer<'a>(
    records: &'a [SubmissionRecord],
    normalized_phone: &str,
) -> Option<&'a SubmissionRecord> {
    latest_match(
        records
            .iter()
            .filter(|record| record.telephone() == normalized_phone),
    )
}

/// Latest record for the phone whose timestamp is at or after `threshold`.
pub fn recent_match<'a>(
    records: &'a [SubmissionRecord],
    normalized_phone: &str,
    threshold: DateTime<Utc>,
) -> Option<&'a SubmissionRecord> {
    latest_match(records.iter().filter(|record| {
        record.telephone() == normalized_phone
            && record
                .created_at()
                .is_some_and(|created_at| created_at.as_datetime() >= threshold)
    }))
}

fn select_latest<'a>(
    current: Option<&'a SubmissionRecord>,
    candidate: &'a SubmissionRecord,
) -> &'a SubmissionRecord {
    match current {
        None => candidate,
        Some(existing) => {
            if candidate.created_at() > existing.created_at() {
                candidate
            } else {
                existing
            }
        }
    }
}
