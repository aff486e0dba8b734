use crate::domain::BlockReason;
use crate::rules::decision::RuleDecision;
use crate::rules::lookup;
use crate::source::SubmissionSource;
use crate::time::now_utc;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulePolicy {
    pub block_across_any_offer: bool,
    pub recent_throttle_minutes: u32,
}

impl RulePolicy {
    /// Start of the throttle window ending at `now`, or `None` when throttling is off.
    pub fn throttle_threshold(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.recent_throttle_minutes == 0 {
            return None;
        }
        let window = Duration::minutes(i64::from(self.recent_throttle_minutes));
        Some(
            now.checked_sub_signed(window)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }
}

/// Applies the blocking rules in priority order; the first rule that finds a
/// match decides. Source errors are returned untouched.
pub struct RuleEngine<'a, S> {
    source: &'a S,
    policy: RulePolicy,
}

impl<'a, S: SubmissionSource> RuleEngine<'a, S> {
    pub fn new(source: &'a S, policy: RulePolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    pub fn evaluate(&self, offer_id: &str, normalized_phone: &str) -> Result<RuleDecision, S::Error> {
        self.evaluate_at(now_utc(), offer_id, normalized_phone)
    }

    pub fn evaluate_at(
        &self,
        now: DateTime<Utc>,
        offer_id: &str,
        normalized_phone: &str,
    ) -> Result<RuleDecision, S::Error> {
        if let Some(matched) = self
            .source
            .find_duplicate_same_offer(normalized_phone, offer_id)?
        {
            return Ok(RuleDecision::blocked(
                BlockReason::DuplicateTelephoneOffer,
                matched,
            ));
        }

        if self.policy.block_across_any_offer {
            if let Some(matched) = self.source.find_duplicate_any_offer(normalized_phone)? {
                return Ok(RuleDecision::blocked(
                    BlockReason::DuplicateTelephoneAnyOffer,
                    matched,
                ));
            }
        }

        if let Some(threshold) = self.policy.throttle_threshold(now) {
            let records = self.source.load_all()?;
            if let Some(matched) = lookup::recent_match(&records, normalized_phone, threshold) {
                return Ok(RuleDecision::blocked(
                    BlockReason::RecentThrottle,
                    matched.clone(),
                ));
            }
        }

        Ok(RuleDecision::Allowed)
    }
}
