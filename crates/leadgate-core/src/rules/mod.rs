pub mod decision;
pub mod engine;
pub mod lookup;

pub use decision::{DecisionPayload, RuleDecision};
pub use engine::{RuleEngine, RulePolicy};
pub use lookup::{duplicate_any_offer, duplicate_same_offer, latest_match, recent_match};
