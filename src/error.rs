use std::path::PathBuf;

use compute::error::{ComputeError, LedgerError};
use model::entities::prelude::{DateKey, PersonId};
use thiserror::Error;

/// Failures of the roster storage
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The roster blob could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Two persons of the stored roster share an ID
    #[error("Duplicate person ID in stored roster: {0}")]
    DuplicatePerson(PersonId),

    /// A stored payment is filed under another day than its own
    #[error("Payment of {date} stored under {date_key} for person {person_id}")]
    MisfiledPayment {
        person_id: PersonId,
        date_key: DateKey,
        date: DateKey,
    },
}

/// Errors returned by the tracker facade
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The ledger refused the payment, nothing was recorded
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Compute(#[from] ComputeError),

    /// The payment was recorded in memory but could not be persisted
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl TrackerError {
    /// True when the ledger rejected the request by one of its business rules.
    pub fn is_rejection(&self) -> bool {
        matches!(self, TrackerError::Ledger(err) if err.is_rejection())
    }
}

/// Type alias for Result with TrackerError
pub type Result<T> = std::result::Result<T, TrackerError>;
