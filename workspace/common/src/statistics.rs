use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reporting horizon of a statistics snapshot: every month of `year` from
/// January through `upto_month` (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub year: i32,
    pub upto_month: u32,
}

impl ReportingPeriod {
    pub fn new(year: i32, upto_month: u32) -> Self {
        Self { year, upto_month }
    }
}

/// Counts and amounts shared by per-person and aggregate statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatisticsSummary {
    /// Denominator of the progress: fixed horizon or days due so far
    pub days_due: u32,
    pub days_paid: u32,
    /// Due days without payment
    pub arrears: u32,
    /// Future days already paid
    pub advances: u32,
    /// Days still to pay to complete the fixed horizon
    pub days_remaining: u32,
    pub amount_arrears: Decimal,
    pub amount_paid: Decimal,
    pub amount_advance: Decimal,
    pub expected_total: Decimal,
    /// Percentage rounded to one decimal
    pub progress_percent: Decimal,
}

/// Statistics of one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStatistics {
    pub person_id: i32,
    pub name: String,
    #[serde(flatten)]
    pub summary: StatisticsSummary,
}

/// Statistics of the whole roster for a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterStatistics {
    pub period: ReportingPeriod,
    /// ISO 4217 code of every amount in this snapshot
    pub currency: String,
    pub persons: Vec<PersonStatistics>,
    pub totals: StatisticsSummary,
    /// Calendar days left until December 31 of the current year
    pub days_remaining_in_year: i64,
}
