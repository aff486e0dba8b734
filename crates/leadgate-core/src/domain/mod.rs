pub mod format;
pub mod phone;
pub mod reason;
pub mod record;
pub mod submission;

pub use format::DatasetFormat;
pub use phone::normalize_phone;
pub use reason::BlockReason;
pub use record::{PublicRecord, RawSubmission, SubmissionRecord};
pub use submission::{SubmissionRequest, ValidSubmission, MIN_PHONE_DIGITS_FLOOR};
