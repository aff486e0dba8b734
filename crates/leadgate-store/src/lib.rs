pub mod audit;
pub mod csv;
pub mod dataset;
pub mod error;
pub mod json;

pub use audit::DecisionLog;
pub use dataset::{DatasetStore, Snapshot};
pub use error::{Result, StoreError, StoreErrorKind};
pub use leadgate_core::SubmissionSource;
