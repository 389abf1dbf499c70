//! Payment eligibility rules and the only mutation of the roster.
//!
//! A person's paid days always form an unbroken run starting at the first
//! trackable day. The run is kept intact incrementally: a day is accepted only
//! when the calendar day before it is already paid, which by induction keeps
//! the whole set contiguous. Days ahead of "today" are accepted only within the
//! advance window.

use chrono::{Datelike, NaiveDate, Utc};
use model::entities::prelude::{DateKey, Payment, Person, PersonId, Roster};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{LedgerError, LedgerResult};

/// Which day counts as the predecessor that must be paid first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceScope {
    /// The true calendar-previous day, across month and year boundaries.
    #[default]
    Calendar,
    /// The previous day within the same month; the 1st of every month has no
    /// predecessor.
    Month,
}

/// Parameters of the payment rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRules {
    /// Amount recorded for every paid day.
    pub daily_rate: Decimal,
    /// How many days ahead of today a payment may be made.
    pub advance_days: u32,
    /// First trackable day; it needs no paid predecessor.
    pub tracking_start: NaiveDate,
    pub sequence_scope: SequenceScope,
}

impl PaymentRules {
    pub const DEFAULT_DAILY_RATE: i64 = 1000;
    pub const DEFAULT_ADVANCE_DAYS: u32 = 3;

    /// Creates rules with the default rate and advance window, tracking from
    /// January 1 of the given year.
    pub fn for_year(year: i32) -> Option<Self> {
        let tracking_start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        Some(Self {
            daily_rate: Decimal::from(Self::DEFAULT_DAILY_RATE),
            advance_days: Self::DEFAULT_ADVANCE_DAYS,
            tracking_start,
            sequence_scope: SequenceScope::Calendar,
        })
    }

    /// Returns the day that has to be paid before `date`, or `None` when
    /// `date` opens a run.
    pub fn required_predecessor(&self, date: NaiveDate) -> Option<NaiveDate> {
        if date <= self.tracking_start {
            return None;
        }
        let previous = date.pred_opt()?;
        match self.sequence_scope {
            SequenceScope::Calendar => Some(previous),
            SequenceScope::Month if previous.month() == date.month() => Some(previous),
            SequenceScope::Month => None,
        }
    }
}

/// Validates and records payments against a fixed reference day.
#[derive(Debug, Clone)]
pub struct Ledger {
    rules: PaymentRules,
    today: NaiveDate,
}

impl Ledger {
    /// Creates a new ledger with an explicit "today".
    pub fn new_with_today(rules: PaymentRules, today: NaiveDate) -> Self {
        Self { rules, today }
    }

    pub fn rules(&self) -> &PaymentRules {
        &self.rules
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Signed number of calendar days from today to `date`.
    pub fn days_ahead(&self, date: NaiveDate) -> i64 {
        (date - self.today).num_days()
    }

    /// True when `date` is strictly after today.
    pub fn is_future(&self, date: NaiveDate) -> bool {
        date > self.today
    }

    /// True when `date` is 1 to `advance_days` days ahead of today.
    pub fn can_pay_in_advance(&self, date: NaiveDate) -> bool {
        let days_ahead = self.days_ahead(date);
        days_ahead > 0 && days_ahead <= i64::from(self.rules.advance_days)
    }

    /// Runs every rule for one person and day without touching anything.
    pub fn check(&self, person: &Person, key: DateKey) -> LedgerResult<()> {
        let date = key.date();

        if self.is_future(date) && !self.can_pay_in_advance(date) {
            return Err(LedgerError::FutureBeyondAdvanceWindow {
                date_key: key,
                days_ahead: self.days_ahead(date),
                window: self.rules.advance_days,
            });
        }

        if date < self.rules.tracking_start {
            return Err(LedgerError::BeforeTrackingStart {
                date_key: key,
                tracking_start: self.rules.tracking_start,
            });
        }

        if person.has_paid(&key) {
            return Err(LedgerError::AlreadyPaid { date_key: key });
        }

        if let Some(previous) = self.rules.required_predecessor(date) {
            let missing = DateKey::from(previous);
            if !person.has_paid(&missing) {
                return Err(LedgerError::SequenceGap {
                    date_key: key,
                    missing,
                });
            }
        }

        Ok(())
    }

    /// Marks a day as paid for one person.
    ///
    /// `month` is 1-based. On success exactly one payment is added to that
    /// person's map and its key is returned; on error nothing changes.
    #[instrument(skip(self, roster), fields(today = %self.today))]
    pub fn mark_paid(
        &self,
        roster: &mut Roster,
        person_id: PersonId,
        day: u32,
        month: u32,
        year: i32,
    ) -> LedgerResult<DateKey> {
        let key = DateKey::from_ymd(year, month, day)
            .ok_or(LedgerError::InvalidDate { year, month, day })?;
        let person = roster
            .person_mut(person_id)
            .ok_or(LedgerError::UnknownPerson { person_id })?;

        if let Err(err) = self.check(person, key) {
            debug!(%person_id, date_key = %key, reason = %err, "Payment rejected");
            return Err(err);
        }

        let payment = Payment::new(key, self.rules.daily_rate, Utc::now());
        if !person.record_payment(payment) {
            return Err(LedgerError::AlreadyPaid { date_key: key });
        }

        info!(%person_id, date_key = %key, amount = %self.rules.daily_rate, "Payment recorded");
        Ok(key)
    }

    /// Tells whether `mark_paid` would succeed, without mutating anything.
    pub fn is_eligible(
        &self,
        roster: &Roster,
        person_id: PersonId,
        day: u32,
        month: u32,
        year: i32,
    ) -> bool {
        let Some(key) = DateKey::from_ymd(year, month, day) else {
            return false;
        };
        roster
            .person(person_id)
            .is_some_and(|person| self.check(person, key).is_ok())
    }
}
