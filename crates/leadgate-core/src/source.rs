use crate::domain::SubmissionRecord;
use crate::rules::lookup;
use std::sync::Arc;

/// Read access to the historical submissions the rules are evaluated against.
///
/// Implementors only have to provide [`SubmissionSource::load_all`]; the
/// duplicate queries default to scanning the loaded records.
pub trait SubmissionSource {
    type Error;

    fn load_all(&self) -> Result<Arc<[SubmissionRecord]>, Self::Error>;

    fn find_duplicate_same_offer(
        &self,
        normalized_phone: &str,
        offer_id: &str,
    ) -> Result<Option<SubmissionRecord>, Self::Error> {
        let records = self.load_all()?;
        Ok(lookup::duplicate_same_offer(&records, normalized_phone, offer_id).cloned())
    }

    fn find_duplicate_any_offer(
        &self,
        normalized_phone: &str,
    ) -> Result<Option<SubmissionRecord>, Self::Error> {
        let records = self.load_all()?;
        Ok(lookup::duplicate_any_offer(&records, normalized_phone).cloned())
    }
}
