use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::date_key::DateKey;
use super::payment::Payment;

/// Stable numeric identity of a person, unique within a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One contributor and the days they have paid for.
///
/// Payments are append-only: once a day is present it is never replaced or
/// removed. The map is keyed by [`DateKey`], so iteration is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    #[serde(default)]
    payments: BTreeMap<DateKey, Payment>,
}

impl Person {
    /// Creates a new Person without any payment.
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            payments: BTreeMap::new(),
        }
    }

    /// Gets the ID of the person.
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Gets the display name of the person.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets all payments of the person, in chronological order.
    pub fn payments(&self) -> &BTreeMap<DateKey, Payment> {
        &self.payments
    }

    /// Gets the payment recorded for a day, if any.
    pub fn payment(&self, key: &DateKey) -> Option<&Payment> {
        self.payments.get(key)
    }

    pub fn has_paid(&self, key: &DateKey) -> bool {
        self.payments.contains_key(key)
    }

    /// Number of days paid so far.
    pub fn paid_days(&self) -> usize {
        self.payments.len()
    }

    /// Records a payment unless one already exists for the same day.
    ///
    /// Returns `false` and leaves the existing record untouched when the day
    /// is already paid.
    pub fn record_payment(&mut self, payment: Payment) -> bool {
        use std::collections::btree_map::Entry;

        match self.payments.entry(payment.date()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                trace!(person_id = %self.id, date_key = %payment.date(), "Recording payment");
                slot.insert(payment);
                true
            }
        }
    }
}
