//! Shared fixtures for the compute tests.
//!
//! Most scenarios run against the same fixed calendar: tracking starts on
//! 2024-03-01 and "today" is 2024-03-10.

use chrono::{Datelike, NaiveDate};
use model::entities::prelude::{PersonId, Roster};

use crate::ledger::{Ledger, PaymentRules};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Rules with the default rate and window, tracking from 2024-03-01.
pub fn scenario_rules() -> PaymentRules {
    PaymentRules {
        tracking_start: date(2024, 3, 1),
        ..PaymentRules::for_year(2024).unwrap()
    }
}

/// Ledger over [`scenario_rules`] with today = 2024-03-10.
pub fn scenario_ledger() -> Ledger {
    Ledger::new_with_today(scenario_rules(), date(2024, 3, 10))
}

pub fn two_person_roster() -> Roster {
    Roster::from_names(["Alice", "Bob"])
}

/// Marks every day in `from..=to` as paid for `person_id`, panicking on the
/// first rejection.
pub fn pay_through(
    ledger: &Ledger,
    roster: &mut Roster,
    person_id: PersonId,
    from: NaiveDate,
    to: NaiveDate,
) {
    for day in from.iter_days().take_while(|d| *d <= to) {
        ledger
            .mark_paid(roster, person_id, day.day(), day.month(), day.year())
            .unwrap_or_else(|err| panic!("Failed to pay {day}: {err}"));
    }
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level is read from RUST_LOG and defaults to WARN.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::WARN);

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}
