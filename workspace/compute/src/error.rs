use chrono::NaiveDate;
use model::entities::prelude::{DateKey, PersonId};
use thiserror::Error;

/// Reasons the ledger refuses to record a payment.
///
/// Every variant is a recoverable rejection: when one is returned the roster
/// has not been modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No person with this ID in the roster
    #[error("Unknown person: {person_id}")]
    UnknownPerson { person_id: PersonId },

    /// The (year, month, day) triple is not a calendar day
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The day precedes the first trackable day
    #[error("{date_key} is before the start of tracking ({tracking_start})")]
    BeforeTrackingStart {
        date_key: DateKey,
        tracking_start: NaiveDate,
    },

    /// The day lies further ahead than the advance window allows
    #[error("{date_key} is {days_ahead} days ahead, advance window is {window} days")]
    FutureBeyondAdvanceWindow {
        date_key: DateKey,
        days_ahead: i64,
        window: u32,
    },

    /// The day is already paid
    #[error("{date_key} is already paid")]
    AlreadyPaid { date_key: DateKey },

    /// The calendar day before is not paid yet
    #[error("{date_key} cannot be paid before {missing}")]
    SequenceGap { date_key: DateKey, missing: DateKey },
}

impl LedgerError {
    /// True for the business-rule rejections (advance window, already paid,
    /// sequence gap), false for malformed requests.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::FutureBeyondAdvanceWindow { .. }
                | LedgerError::AlreadyPaid { .. }
                | LedgerError::SequenceGap { .. }
        )
    }
}

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// Error from ledger operations
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Month outside 1..=12
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Year outside the supported calendar range
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    /// Unknown person requested from a statistics call
    #[error("Unknown person: {0}")]
    UnknownPerson(PersonId),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;

/// Type alias for Result with LedgerError
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classification() {
        let key = DateKey::from_ymd(2024, 3, 5).unwrap();

        assert!(LedgerError::AlreadyPaid { date_key: key }.is_rejection());
        assert!(
            LedgerError::SequenceGap {
                date_key: key,
                missing: key.pred().unwrap()
            }
            .is_rejection()
        );
        assert!(!LedgerError::UnknownPerson { person_id: PersonId(9) }.is_rejection());
        assert!(
            !LedgerError::InvalidDate {
                year: 2024,
                month: 2,
                day: 30
            }
            .is_rejection()
        );
    }

    #[test]
    fn test_messages() {
        let key = DateKey::from_ymd(2024, 3, 5).unwrap();
        let err = LedgerError::SequenceGap {
            date_key: key,
            missing: key.pred().unwrap(),
        };
        assert_eq!(err.to_string(), "2024-03-05 cannot be paid before 2024-03-04");

        let wrapped: ComputeError = err.into();
        assert!(wrapped.to_string().starts_with("Ledger error:"));
    }
}
