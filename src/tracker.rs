use chrono::NaiveDate;
use common::{PersonStatistics, ReportingPeriod, RosterStatistics};
use compute::calendar::{MonthView, month_view};
use compute::clock::{Clock, FixedClock, LocalClock};
use compute::error::ComputeError;
use compute::ledger::Ledger;
use compute::statistics::StatisticsEngine;
use model::entities::prelude::{DateKey, PersonId, Roster};
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::error::{Result, TrackerError};
use crate::store::{LedgerStore, RosterStorage};

/// Entry point of the presentation layer.
///
/// Wires the ledger rules, the statistics engine and the store together.
/// "Today" is read from the clock on every call, so a long-running tracker
/// follows the calendar. Every accepted payment is written through to the
/// storage before it becomes visible in memory.
#[derive(Debug)]
pub struct ContributionTracker {
    store: LedgerStore,
    config: AppConfig,
    clock: Box<dyn Clock>,
}

impl ContributionTracker {
    /// Opens the tracker on the local calendar.
    pub fn open(config: &AppConfig, storage: Box<dyn RosterStorage>) -> Result<Self> {
        Self::open_with_clock(config, storage, Box::new(LocalClock))
    }

    /// Opens the tracker with "today" pinned to a given day.
    pub fn open_with_today(
        config: &AppConfig,
        storage: Box<dyn RosterStorage>,
        today: NaiveDate,
    ) -> Result<Self> {
        Self::open_with_clock(config, storage, Box::new(FixedClock(today)))
    }

    #[instrument(skip(config, storage))]
    pub fn open_with_clock(
        config: &AppConfig,
        storage: Box<dyn RosterStorage>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let store = LedgerStore::load(storage, &config.storage.key, config.default_roster())?;

        info!(persons = store.roster().len(), "Tracker opened");
        Ok(Self {
            store,
            config: config.clone(),
            clock,
        })
    }

    /// Marks a day as paid for one person and persists the roster.
    ///
    /// `month` is 1-based. The payment is applied to a copy of the roster which
    /// is written to the storage first; the in-memory roster only changes once
    /// the write succeeded. On any error nothing is recorded.
    pub fn mark_paid(&mut self, person_id: PersonId, day: u32, month: u32, year: i32) -> Result<DateKey> {
        let mut staged = self.store.roster().clone();
        let key = self.ledger().mark_paid(&mut staged, person_id, day, month, year)?;

        if let Err(err) = self.store.commit(staged) {
            error!(%person_id, date_key = %key, error = %err, "Failed to persist payment");
            return Err(err.into());
        }
        Ok(key)
    }

    /// Tells whether [`Self::mark_paid`] would be accepted.
    pub fn is_eligible(&self, person_id: PersonId, day: u32, month: u32, year: i32) -> bool {
        self.ledger()
            .is_eligible(self.store.roster(), person_id, day, month, year)
    }

    /// Statistics of one person up to `upto_month` of `year`.
    pub fn person_statistics(
        &self,
        person_id: PersonId,
        upto_month: u32,
        year: i32,
    ) -> Result<PersonStatistics> {
        let person = self
            .store
            .roster()
            .person(person_id)
            .ok_or(ComputeError::UnknownPerson(person_id))?;
        let stats = self.statistics().person_stats(person, upto_month, year)?;
        Ok(stats.to_statistics())
    }

    /// Statistics of every person and their totals up to `upto_month` of `year`.
    pub fn roster_statistics(&self, upto_month: u32, year: i32) -> Result<RosterStatistics> {
        let stats = self
            .statistics()
            .roster_stats(self.store.roster(), upto_month, year)?;
        Ok(stats.to_statistics(ReportingPeriod::new(year, upto_month), &self.config.currency))
    }

    pub fn month_view(&self, year: i32, month: u32) -> Result<MonthView> {
        month_view(&self.ledger(), self.store.roster(), year, month).map_err(TrackerError::from)
    }

    /// Formats an amount in the configured currency, e.g. for statistics totals.
    pub fn format_amount(&self, amount: rust_decimal::Decimal) -> Option<String> {
        common::format_amount(amount, &self.config.currency)
    }

    pub fn roster(&self) -> &Roster {
        self.store.roster()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Ledger evaluated against the current day.
    pub fn ledger(&self) -> Ledger {
        let today = self.today();
        Ledger::new_with_today(self.config.payment_rules(today), today)
    }

    /// Statistics engine evaluated against the current day.
    pub fn statistics(&self) -> StatisticsEngine {
        let today = self.today();
        StatisticsEngine::new_with_today(self.config.statistics_config(today), today)
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }
}
