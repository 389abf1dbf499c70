//! Common transport-layer types shared between the contribution core and its
//! presentation layer.
//! These structs are what a renderer receives: plain serializable snapshots of
//! the statistics, detached from the ledger types they were computed from.

mod money;
mod statistics;

pub use money::{format_amount, is_known_currency};
pub use statistics::{PersonStatistics, ReportingPeriod, RosterStatistics, StatisticsSummary};
