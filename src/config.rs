use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use compute::ledger::{PaymentRules, SequenceScope};
use compute::statistics::{StatisticsConfig, StatisticsPolicy};
use config::{Config, Environment, File};
use model::entities::prelude::Roster;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Configuration file looked up when `COTISATION_CONFIG` is not set.
/// The extension is optional, any format supported by `config` works.
pub const DEFAULT_CONFIG_FILE: &str = "cotisation";

/// Statistics settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatisticsSettings {
    /// Progress denominator policy
    pub policy: StatisticsPolicy,
    /// Days per person of the fixed horizon
    pub horizon_days: u32,
}

/// Sequential gating settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SequenceSettings {
    pub scope: SequenceScope,
}

/// Where the roster blob is kept
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    /// Directory of the JSON file store
    pub dir: PathBuf,
    /// Well-known key of the roster blob
    pub key: String,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Amount owed for every day
    pub daily_rate: Decimal,
    /// How many days ahead a payment may be made
    pub advance_days: u32,
    /// ISO 4217 code used when presenting amounts
    pub currency: String,
    pub statistics: StatisticsSettings,
    pub sequence: SequenceSettings,
    /// First trackable day, January 1 of the current year when unset
    pub tracking_start: Option<NaiveDate>,
    pub storage: StorageSettings,
    /// Names of the default roster, used when nothing is persisted yet
    pub members: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            daily_rate: Decimal::from(PaymentRules::DEFAULT_DAILY_RATE),
            advance_days: PaymentRules::DEFAULT_ADVANCE_DAYS,
            currency: "XOF".to_string(),
            statistics: StatisticsSettings {
                policy: StatisticsPolicy::FixedHorizon,
                horizon_days: StatisticsConfig::DEFAULT_HORIZON_DAYS,
            },
            sequence: SequenceSettings {
                scope: SequenceScope::Calendar,
            },
            tracking_start: None,
            storage: StorageSettings {
                dir: PathBuf::from("./data"),
                key: "roster".to_string(),
            },
            members: vec!["Alice".to_string(), "Bob".to_string(), "Charlie".to_string()],
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `.env`, the configuration file and the
    /// `COTISATION_*` environment variables, in increasing priority.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let file = std::env::var("COTISATION_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&file))
    }

    /// Loads the configuration using `file` as the (optional) configuration file.
    pub fn load_from(file: &Path) -> Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("daily_rate", defaults.daily_rate.to_string())?
            .set_default("advance_days", i64::from(defaults.advance_days))?
            .set_default("currency", defaults.currency.clone())?
            .set_default("statistics.policy", "fixed_horizon")?
            .set_default("statistics.horizon_days", i64::from(defaults.statistics.horizon_days))?
            .set_default("sequence.scope", "calendar")?
            .set_default("storage.dir", defaults.storage.dir.to_string_lossy().to_string())?
            .set_default("storage.key", defaults.storage.key.clone())?
            .set_default("members", defaults.members.clone())?
            .add_source(File::from(file).required(false))
            .add_source(
                Environment::with_prefix("COTISATION")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", file.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;

        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Rejects values the ledger cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.daily_rate <= Decimal::ZERO {
            bail!("daily_rate must be positive, got {}", self.daily_rate);
        }
        if self.members.is_empty() {
            bail!("members must name at least one person");
        }
        if self.storage.key.trim().is_empty() {
            bail!("storage.key must not be empty");
        }
        if !common::is_known_currency(&self.currency) {
            bail!("Unknown currency code: {}", self.currency);
        }
        Ok(())
    }

    /// First trackable day as seen from `today`.
    pub fn tracking_start(&self, today: NaiveDate) -> NaiveDate {
        self.tracking_start
            .unwrap_or_else(|| today.with_ordinal(1).unwrap_or(today))
    }

    /// Payment rules of the ledger as seen from `today`.
    pub fn payment_rules(&self, today: NaiveDate) -> PaymentRules {
        PaymentRules {
            daily_rate: self.daily_rate,
            advance_days: self.advance_days,
            tracking_start: self.tracking_start(today),
            sequence_scope: self.sequence.scope,
        }
    }

    /// Parameters of the statistics engine as seen from `today`.
    pub fn statistics_config(&self, today: NaiveDate) -> StatisticsConfig {
        StatisticsConfig {
            policy: self.statistics.policy,
            horizon_days: self.statistics.horizon_days,
            daily_rate: self.daily_rate,
            tracking_start: Some(self.tracking_start(today)),
        }
    }

    /// Roster used when no blob has been persisted yet.
    pub fn default_roster(&self) -> Roster {
        Roster::from_names(self.members.iter().cloned())
    }
}
