use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date_key::DateKey;

/// One confirmed daily contribution.
///
/// The `recorded_at` timestamp is informational only; eligibility rules never
/// look at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    date: DateKey,
    amount: Decimal,
    recorded_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new Payment.
    pub fn new(date: DateKey, amount: Decimal, recorded_at: DateTime<Utc>) -> Self {
        Self {
            date,
            amount,
            recorded_at,
        }
    }

    /// Gets the day this payment covers.
    pub fn date(&self) -> DateKey {
        self.date
    }

    /// Gets the amount paid.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Gets the instant the payment was entered.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
