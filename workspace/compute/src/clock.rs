use std::fmt::Debug;

use chrono::{Local, NaiveDate};

/// Source of the reference day ("today") the rules are evaluated against.
pub trait Clock: Debug {
    fn today(&self) -> NaiveDate;
}

/// The current local calendar day, read on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date(2024, 3, 10));
        assert_eq!(clock.today(), date(2024, 3, 10));
        assert_eq!(clock.today(), clock.today());
    }

    #[test]
    fn test_local_clock_follows_the_calendar() {
        let before = Local::now().date_naive();
        let today = LocalClock.today();
        let after = Local::now().date_naive();

        assert!(before <= today && today <= after);
    }
}
