pub mod calendar;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod statistics;
pub mod utils;

#[cfg(test)]
mod testing;
