use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("telephone must contain at least {min_digits} digits after normalization")]
    TelephoneTooShort { min_digits: usize },
}

impl CoreError {
    /// Stable code reported to callers alongside the message.
    pub const fn code(&self) -> &'static str {
        match self {
            CoreError::MissingField(_) => "invalid-request",
            CoreError::TelephoneTooShort { .. } => "invalid-telephone",
        }
    }
}
