use crate::domain::phone::normalize_phone;
use crate::error::CoreError;

/// Floor applied to the configured minimum digit count.
pub const MIN_PHONE_DIGITS_FLOOR: usize = 6;

/// An incoming check request as the caller supplied it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub offer_id: String,
    pub telephone: String,
}

/// A request that passed validation: trimmed offer id, digits-only phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub offer_id: String,
    pub normalized_phone: String,
}

impl SubmissionRequest {
    pub fn new(offer_id: impl Into<String>, telephone: impl Into<String>) -> Self {
        Self {
            offer_id: offer_id.into(),
            telephone: telephone.into(),
        }
    }

    pub fn validate(&self, min_phone_digits: usize) -> Result<ValidSubmission, CoreError> {
        let offer_id = self.offer_id.trim();
        let telephone = self.telephone.trim();
        if offer_id.is_empty() {
            return Err(CoreError::MissingField("offerId"));
        }
        if telephone.is_empty() {
            return Err(CoreError::MissingField("telephone"));
        }

        let normalized_phone = normalize_phone(telephone);
        if normalized_phone.len() < min_phone_digits {
            return Err(CoreError::TelephoneTooShort {
                min_digits: min_phone_digits,
            });
        }

        Ok(ValidSubmission {
            offer_id: offer_id.to_string(),
            normalized_phone,
        })
    }
}
