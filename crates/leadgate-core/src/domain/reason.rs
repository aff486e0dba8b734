use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockReason {
    DuplicateTelephoneOffer,
    DuplicateTelephoneAnyOffer,
    RecentThrottle,
}

impl BlockReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            BlockReason::DuplicateTelephoneOffer => "duplicate-telephone-offer",
            BlockReason::DuplicateTelephoneAnyOffer => "duplicate-telephone-any-offer",
            BlockReason::RecentThrottle => "recent-throttle",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "duplicate-telephone-offer" => Some(BlockReason::DuplicateTelephoneOffer),
            "duplicate-telephone-any-offer" => Some(BlockReason::DuplicateTelephoneAnyOffer),
            "recent-throttle" => Some(BlockReason::RecentThrottle),
            _ => None,
        }
    }

    pub const fn all() -> &'static [BlockReason] {
        &[
            BlockReason::DuplicateTelephoneOffer,
            BlockReason::DuplicateTelephoneAnyOffer,
            BlockReason::RecentThrottle,
        ]
    }
}
