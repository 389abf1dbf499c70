//! Contribution statistics for persons and for the whole roster.
//!
//! Statistics are a pure function of the payment maps, a reporting horizon
//! (year and last month included) and the reference day. Nothing is cached:
//! every call walks the horizon again.
//!
//! Two denominator policies exist:
//! - [`StatisticsPolicy::FixedHorizon`]: progress is measured against a fixed
//!   number of days per person (365 by default), whatever the date.
//! - [`StatisticsPolicy::DueHorizon`]: progress is measured against the days
//!   already due (up to and including today).

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use common::{PersonStatistics, ReportingPeriod, RosterStatistics, StatisticsSummary};
use model::entities::prelude::{DateKey, Payment, Person, PersonId, Roster};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::utils::{days_until_year_end, last_day_of_month};

/// Denominator used for progress and arrears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsPolicy {
    /// Fixed number of days per person; arrears are unpaid days strictly
    /// before today.
    #[default]
    FixedHorizon,
    /// Days due so far (up to and including today); arrears are due days
    /// without payment.
    DueHorizon,
}

/// Parameters of the statistics computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsConfig {
    pub policy: StatisticsPolicy,
    /// Days per person in the fixed horizon.
    pub horizon_days: u32,
    pub daily_rate: Decimal,
    /// Days before this one are never due. `None` means January 1.
    pub tracking_start: Option<NaiveDate>,
}

impl StatisticsConfig {
    pub const DEFAULT_HORIZON_DAYS: u32 = 365;
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            policy: StatisticsPolicy::FixedHorizon,
            horizon_days: Self::DEFAULT_HORIZON_DAYS,
            daily_rate: Decimal::from(1000),
            tracking_start: None,
        }
    }
}

/// Counts and amounts of one statistics computation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stats {
    /// Progress denominator: the fixed horizon or the days due so far.
    pub days_due: u32,
    pub days_paid: u32,
    pub arrears: u32,
    pub advances: u32,
    pub days_remaining: u32,
    pub amount_arrears: Decimal,
    pub amount_paid: Decimal,
    pub amount_advance: Decimal,
    pub expected_total: Decimal,
    pub progress_percent: Decimal,
}

impl Stats {
    fn from_counts(
        days_due: u32,
        days_paid: u32,
        arrears: u32,
        advances: u32,
        days_remaining: u32,
        daily_rate: Decimal,
    ) -> Self {
        Self {
            days_due,
            days_paid,
            arrears,
            advances,
            days_remaining,
            amount_arrears: Decimal::from(arrears) * daily_rate,
            amount_paid: Decimal::from(days_paid) * daily_rate,
            amount_advance: Decimal::from(advances) * daily_rate,
            expected_total: Decimal::from(days_due) * daily_rate,
            progress_percent: progress_percent(days_paid, days_due),
        }
    }

    /// Sums counts and amounts; the progress is recomputed from the sums.
    fn sum<'a>(all: impl IntoIterator<Item = &'a Stats>) -> Self {
        let mut total = all.into_iter().fold(Stats::default(), |mut acc, s| {
            acc.days_due += s.days_due;
            acc.days_paid += s.days_paid;
            acc.arrears += s.arrears;
            acc.advances += s.advances;
            acc.days_remaining += s.days_remaining;
            acc.amount_arrears += s.amount_arrears;
            acc.amount_paid += s.amount_paid;
            acc.amount_advance += s.amount_advance;
            acc.expected_total += s.expected_total;
            acc
        });
        total.progress_percent = progress_percent(total.days_paid, total.days_due);
        total
    }

    pub fn to_summary(&self) -> StatisticsSummary {
        StatisticsSummary {
            days_due: self.days_due,
            days_paid: self.days_paid,
            arrears: self.arrears,
            advances: self.advances,
            days_remaining: self.days_remaining,
            amount_arrears: self.amount_arrears,
            amount_paid: self.amount_paid,
            amount_advance: self.amount_advance,
            expected_total: self.expected_total,
            progress_percent: self.progress_percent,
        }
    }
}

/// Statistics of one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonStats {
    pub person_id: PersonId,
    pub name: String,
    pub stats: Stats,
}

impl PersonStats {
    pub fn to_statistics(&self) -> PersonStatistics {
        PersonStatistics {
            person_id: self.person_id.0,
            name: self.name.clone(),
            summary: self.stats.to_summary(),
        }
    }
}

/// Per-person statistics plus their aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStats {
    pub persons: Vec<PersonStats>,
    pub totals: Stats,
    pub days_remaining_in_year: i64,
}

impl RosterStats {
    /// Converts into the transport snapshot handed to the presentation layer.
    pub fn to_statistics(&self, period: ReportingPeriod, currency: &str) -> RosterStatistics {
        RosterStatistics {
            period,
            currency: currency.to_string(),
            persons: self.persons.iter().map(PersonStats::to_statistics).collect(),
            totals: self.totals.to_summary(),
            days_remaining_in_year: self.days_remaining_in_year,
        }
    }
}

/// `days_paid / denominator * 100` rounded half away from zero to one decimal,
/// 0 when nothing is due.
pub fn progress_percent(days_paid: u32, denominator: u32) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(days_paid) * Decimal::ONE_HUNDRED / Decimal::from(denominator))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Default)]
struct DayCounts {
    due: u32,
    paid_due: u32,
    unpaid_past: u32,
    paid_future: u32,
}

fn count_days(
    payments: &BTreeMap<DateKey, Payment>,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> DayCounts {
    let mut counts = DayCounts::default();
    for date in start.iter_days().take_while(|d| *d <= end) {
        let paid = payments.contains_key(&DateKey::from(date));
        if date <= today {
            counts.due += 1;
            if paid {
                counts.paid_due += 1;
            }
        }
        if !paid && date < today {
            counts.unpaid_past += 1;
        }
        if paid && date > today {
            counts.paid_future += 1;
        }
    }
    counts
}

/// Computes the statistics of one payment map for the months 1 through
/// `upto_month` of `year`.
pub fn compute_stats(
    payments: &BTreeMap<DateKey, Payment>,
    upto_month: u32,
    year: i32,
    today: NaiveDate,
    config: &StatisticsConfig,
) -> Result<Stats> {
    let first_of_year = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(ComputeError::InvalidYear(year))?;
    let end = last_day_of_month(year, upto_month).ok_or(ComputeError::InvalidMonth(upto_month))?;
    let start = config
        .tracking_start
        .map_or(first_of_year, |start| start.max(first_of_year));

    let counts = count_days(payments, start, end, today);

    let stats = match config.policy {
        StatisticsPolicy::FixedHorizon => {
            let days_paid = payments.keys().filter(|k| k.year() == year).count() as u32;
            Stats::from_counts(
                config.horizon_days,
                days_paid,
                counts.unpaid_past,
                counts.paid_future,
                config.horizon_days.saturating_sub(days_paid),
                config.daily_rate,
            )
        }
        StatisticsPolicy::DueHorizon => Stats::from_counts(
            counts.due,
            counts.paid_due,
            counts.due - counts.paid_due,
            counts.paid_future,
            config.horizon_days.saturating_sub(counts.paid_due),
            config.daily_rate,
        ),
    };
    Ok(stats)
}

/// Computes statistics against a fixed reference day.
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    config: StatisticsConfig,
    today: NaiveDate,
}

impl StatisticsEngine {
    /// Creates a new engine with an explicit "today".
    pub fn new_with_today(config: StatisticsConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Statistics of one person up to `upto_month` of `year`.
    #[instrument(skip(self, person), fields(person_id = %person.id()))]
    pub fn person_stats(&self, person: &Person, upto_month: u32, year: i32) -> Result<PersonStats> {
        let stats = compute_stats(person.payments(), upto_month, year, self.today, &self.config)?;
        debug!(
            days_paid = stats.days_paid,
            arrears = stats.arrears,
            advances = stats.advances,
            "Computed person statistics"
        );
        Ok(PersonStats {
            person_id: person.id(),
            name: person.name().to_string(),
            stats,
        })
    }

    /// Per-person statistics and their aggregate, up to `upto_month` of `year`.
    #[instrument(skip(self, roster), fields(persons = roster.len()))]
    pub fn roster_stats(&self, roster: &Roster, upto_month: u32, year: i32) -> Result<RosterStats> {
        let persons = roster
            .iter()
            .map(|person| self.person_stats(person, upto_month, year))
            .collect::<Result<Vec<_>>>()?;
        let totals = Stats::sum(persons.iter().map(|p| &p.stats));
        let days_remaining_in_year = days_until_year_end(self.today);

        debug!(
            days_paid = totals.days_paid,
            arrears = totals.arrears,
            year = self.today.year(),
            days_remaining_in_year,
            "Computed roster statistics"
        );
        Ok(RosterStats {
            persons,
            totals,
            days_remaining_in_year,
        })
    }
}
