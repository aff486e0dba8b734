use crate::domain::phone::normalize_phone;
use crate::time::CreatedAt;
use serde::Serialize;

/// One historical submission as loaded from the dataset.
///
/// The normalized telephone is derived from the raw value at construction and
/// cannot drift from it afterwards. The raw value stays inside the process:
/// only [`PublicRecord`] is serializable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    source_id: String,
    offer_id: String,
    telephone: String,
    created_at: Option<CreatedAt>,
    raw_telephone: String,
}

impl SubmissionRecord {
    pub fn new(
        source_id: impl Into<String>,
        offer_id: impl Into<String>,
        raw_telephone: impl Into<String>,
        created_at: Option<CreatedAt>,
    ) -> Self {
        let raw_telephone = raw_telephone.into();
        Self {
            source_id: source_id.into(),
            offer_id: offer_id.into(),
            telephone: normalize_phone(&raw_telephone),
            created_at,
            raw_telephone,
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn offer_id(&self) -> &str {
        &self.offer_id
    }

    pub fn telephone(&self) -> &str {
        &self.telephone
    }

    pub fn created_at(&self) -> Option<CreatedAt> {
        self.created_at
    }

    pub fn raw_telephone(&self) -> &str {
        &self.raw_telephone
    }

    pub fn matches_offer(&self, offer_id: &str) -> bool {
        self.offer_id.eq_ignore_ascii_case(offer_id)
    }

    pub fn to_public(&self) -> PublicRecord {
        PublicRecord {
            source_id: self.source_id.clone(),
            offer_id: self.offer_id.clone(),
            telephone: self.telephone.clone(),
            created_at: self.created_at,
        }
    }
}

/// The fields of a matched record that may be shown to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRecord {
    pub source_id: String,
    pub offer_id: String,
    pub telephone: String,
    pub created_at: Option<CreatedAt>,
}

/// A dataset row before field coercion. Absent fields take their defaults in
/// [`RawSubmission::into_record`]; an unparseable timestamp becomes absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission {
    pub source_id: Option<String>,
    pub offer_id: Option<String>,
    pub telephone: Option<String>,
    pub created_at: Option<String>,
}

impl RawSubmission {
    pub fn into_record(self) -> SubmissionRecord {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|value| CreatedAt::parse(value).ok());
        SubmissionRecord::new(
            self.source_id.unwrap_or_default(),
            self.offer_id.unwrap_or_default(),
            self.telephone.unwrap_or_default(),
            created_at,
        )
    }
}
