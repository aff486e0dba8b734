use crate::domain::{BlockReason, PublicRecord, SubmissionRecord};
use serde::Serialize;

/// Outcome of one rule evaluation. A block always carries the reason and the
/// record that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDecision {
    Allowed,
    Blocked {
        reason: BlockReason,
        matched: SubmissionRecord,
    },
}

impl RuleDecision {
    pub fn blocked(reason: BlockReason, matched: SubmissionRecord) -> Self {
        RuleDecision::Blocked { reason, matched }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, RuleDecision::Blocked { .. })
    }

    pub fn reason(&self) -> Option<BlockReason> {
        match self {
            RuleDecision::Allowed => None,
            RuleDecision::Blocked { reason, .. } => Some(*reason),
        }
    }

    pub fn matched(&self) -> Option<&SubmissionRecord> {
        match self {
            RuleDecision::Allowed => None,
            RuleDecision::Blocked { matched, .. } => Some(matched),
        }
    }

    /// Caller-facing payload; only the public projection of the match is included.
    pub fn to_payload(&self) -> DecisionPayload {
        DecisionPayload {
            blocked: self.is_blocked(),
            reason: self.reason(),
            matched_record: self.matched().map(SubmissionRecord::to_public),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPayload {
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<BlockReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_record: Option<PublicRecord>,
}
