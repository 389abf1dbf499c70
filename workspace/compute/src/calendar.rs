//! Calendar view model for one month of the roster.
//!
//! The presentation layer only paints what this module hands over: every day
//! of the month with its classification and, per person, whether the day is
//! paid and whether it may be marked now.

use chrono::{Datelike, NaiveDate};
use model::entities::prelude::{DateKey, PersonId, Roster};
use serde::Serialize;
use tracing::{instrument, trace};

use crate::error::{ComputeError, Result};
use crate::ledger::Ledger;
use crate::utils::days_in_month;

/// Facts about one day that drive its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFlags {
    /// Every person of a non-empty roster paid the day
    pub all_paid: bool,
    /// Nobody paid the day
    pub none_paid: bool,
    pub is_future: bool,
    /// Strictly before today
    pub is_past: bool,
    /// Within the advance window
    pub can_advance: bool,
}

/// Visual state of a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Everybody paid, day still ahead
    AdvancePaid,
    /// Everybody paid, day today or past
    Paid,
    /// Past day nobody paid
    Delinquent,
    /// Past day some paid
    PartiallyPaid,
    /// Future day open for advance payment
    AdvanceWindow,
    /// Future day beyond the advance window
    Upcoming,
    Default,
}

/// Colour tokens of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellPalette {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl CellState {
    /// Classifies a day. The first matching row wins.
    pub fn classify(flags: CellFlags) -> Self {
        let CellFlags {
            all_paid,
            none_paid,
            is_future,
            is_past,
            can_advance,
        } = flags;

        match (all_paid, none_paid, is_future, is_past, can_advance) {
            (true, _, true, _, _) => CellState::AdvancePaid,
            (true, _, _, _, _) => CellState::Paid,
            (false, true, _, true, _) => CellState::Delinquent,
            (false, false, _, true, _) => CellState::PartiallyPaid,
            (_, _, _, _, true) => CellState::AdvanceWindow,
            (_, _, true, _, _) => CellState::Upcoming,
            _ => CellState::Default,
        }
    }

    pub fn palette(self) -> CellPalette {
        let (background, text, border) = match self {
            CellState::AdvancePaid => ("green-100", "green-800", "green-300"),
            CellState::Paid => ("blue-100", "blue-800", "blue-300"),
            CellState::Delinquent => ("red-100", "red-800", "red-300"),
            CellState::PartiallyPaid => ("orange-100", "orange-800", "orange-300"),
            CellState::AdvanceWindow => ("yellow-50", "gray-700", "yellow-300"),
            CellState::Upcoming => ("gray-100", "gray-400", "gray-200"),
            CellState::Default => ("gray-50", "gray-700", "gray-200"),
        };
        CellPalette {
            background,
            text,
            border,
        }
    }
}

/// One person's button in a day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonCell {
    pub person_id: PersonId,
    pub paid: bool,
    /// Marking the day now would be accepted by the ledger
    pub can_mark: bool,
}

/// One day of the month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date_key: DateKey,
    pub is_today: bool,
    pub is_future: bool,
    pub is_past: bool,
    pub can_advance: bool,
    pub state: CellState,
    pub persons: Vec<PersonCell>,
}

/// A whole month laid out for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st, weeks starting on Sunday
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

/// Builds the view of `month` (1-based) of `year` as seen from the ledger's
/// "today".
#[instrument(skip(ledger, roster), fields(today = %ledger.today()))]
pub fn month_view(ledger: &Ledger, roster: &Roster, year: i32, month: u32) -> Result<MonthView> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(if (1..=12).contains(&month) {
        ComputeError::InvalidYear(year)
    } else {
        ComputeError::InvalidMonth(month)
    })?;
    let today = ledger.today();

    let days = first
        .iter_days()
        .take(days_in_month(year, month) as usize)
        .map(|date| {
            let date_key = DateKey::from(date);
            let persons: Vec<PersonCell> = roster
                .iter()
                .map(|person| PersonCell {
                    person_id: person.id(),
                    paid: person.has_paid(&date_key),
                    can_mark: ledger.check(person, date_key).is_ok(),
                })
                .collect();

            let paid_count = persons.iter().filter(|p| p.paid).count();
            let flags = CellFlags {
                all_paid: !persons.is_empty() && paid_count == persons.len(),
                none_paid: paid_count == 0,
                is_future: ledger.is_future(date),
                is_past: date < today,
                can_advance: ledger.can_pay_in_advance(date),
            };
            let state = CellState::classify(flags);
            trace!(date_key = %date_key, ?state, "Classified day");

            DayCell {
                day: date.day(),
                date_key,
                is_today: date == today,
                is_future: flags.is_future,
                is_past: flags.is_past,
                can_advance: flags.can_advance,
                state,
                persons,
            }
        })
        .collect();

    Ok(MonthView {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
