//! Daily contribution tracker.
//!
//! A fixed roster of persons each owes one contribution per calendar day. The
//! crate records payments under the sequencing and advance-window rules of
//! [`compute::ledger`], derives progress statistics, lays out month views for
//! a renderer and persists the whole roster as a JSON blob after every
//! accepted payment.
//!
//! [`ContributionTracker`] is the entry point:
//!
//! ```no_run
//! use cotisation::{AppConfig, ContributionTracker, JsonFileStorage};
//!
//! # fn main() -> anyhow::Result<()> {
//! cotisation::telemetry::init_tracing();
//! let config = AppConfig::load()?;
//! let storage = JsonFileStorage::new(&config.storage.dir);
//! let mut tracker = ContributionTracker::open(&config, Box::new(storage))?;
//! tracker.mark_paid(model::entities::prelude::PersonId(1), 1, 1, 2024)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod tracker;

#[cfg(test)]
mod test_utils;

pub use config::AppConfig;
pub use error::{StoreError, TrackerError};
pub use store::{JsonFileStorage, LedgerStore, MemoryStorage, RosterStorage};
pub use tracker::ContributionTracker;
