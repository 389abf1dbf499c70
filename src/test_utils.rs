#[cfg(test)]
pub mod test_utils {
    use chrono::NaiveDate;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::config::AppConfig;
    use crate::store::MemoryStorage;
    use crate::tracker::ContributionTracker;

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Configuration of the reference scenario: Alice and Bob, 1000 per day,
    /// tracking from 2024-03-01.
    pub fn scenario_config() -> AppConfig {
        AppConfig {
            tracking_start: Some(date(2024, 3, 1)),
            members: vec!["Alice".to_string(), "Bob".to_string()],
            ..AppConfig::default()
        }
    }

    /// Tracker over [`scenario_config`] with today = 2024-03-10, backed by
    /// `storage`.
    pub fn setup_tracker(storage: MemoryStorage) -> ContributionTracker {
        ContributionTracker::open_with_today(&scenario_config(), Box::new(storage), date(2024, 3, 10))
            .expect("Failed to open tracker")
    }

    /// Pays `from..=to` of March 2024 for one person.
    pub fn pay_march(tracker: &mut ContributionTracker, person_id: i32, from: u32, to: u32) {
        for day in from..=to {
            tracker
                .mark_paid(model::entities::prelude::PersonId(person_id), day, 3, 2024)
                .unwrap_or_else(|err| panic!("Failed to pay 2024-03-{day:02}: {err}"));
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_default(subscriber)
    }
}
