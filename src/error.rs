use thiserror::Error;

use crate::store::StoreError;

/// Why an appointment could not be moved
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidState {
    #[error("appointment already has a date and cannot be reordered")]
    NotWaiting,

    #[error("appointment is already first on the waiting list")]
    AlreadyFirst,

    #[error("appointment is already last on the waiting list")]
    AlreadyLast,
}

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("appointment not found: id={id}")]
    NotFound { id: String },

    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidState),

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl SchedulingError {
    pub fn not_found(id: &str) -> Self {
        SchedulingError::NotFound { id: id.to_string() }
    }
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
