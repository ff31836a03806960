use crate::error::{AppError, Result};
use crate::services::period_planner::parse_duration;
use crate::types::PeriodDuration;
use std::env;
use std::path::PathBuf;

/// Upper bound for samples in one period.
pub const MAX_SAMPLES_PER_PERIOD: usize = 10_000;
/// Upper bound for periods in one run.
pub const MAX_PERIOD_COUNT: usize = 10_000;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Instrument symbol (e.g. BTCUSDT, AAPL).
    pub symbol: String,
    /// Period length, e.g. "10min", "1hora", "1dia".
    pub period: String,
    /// Sample queries per period.
    pub samples_per_period: usize,
    /// Number of periods to look back.
    pub period_count: usize,
    /// Name of the price provider (binance, yahoo, mock).
    pub provider: String,
    /// API key for providers that accept one.
    pub api_key: Option<String>,
    /// Directory where observation CSVs are written.
    pub data_dir: PathBuf,
    /// Pause after each fetch (ms).
    pub fetch_delay_ms: u64,
    /// Fetches in flight at once.
    pub fetch_concurrency: usize,
    /// HTTP request timeout (seconds).
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            symbol: env::var("SYMBOL").unwrap_or_else(|_| "BTCUSDT".to_string()),
            period: env::var("PERIOD").unwrap_or_else(|_| "10min".to_string()),
            samples_per_period: env::var("SAMPLES_PER_PERIOD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            period_count: env::var("PERIOD_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            provider: env::var("PROVIDER").unwrap_or_else(|_| "binance".to_string()),
            api_key: env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/csvs")),
            fetch_delay_ms: env::var("FETCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            fetch_concurrency: env::var("FETCH_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Parse the configured period.
    pub fn period_duration(&self) -> Result<PeriodDuration> {
        parse_duration(&self.period)
    }

    /// Check that the configuration can drive an analysis run.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(AppError::InvalidConfig("symbol must not be empty".to_string()));
        }

        let duration = self.period_duration()?;
        if duration.is_zero() {
            return Err(AppError::InvalidConfig(format!(
                "period '{}' has zero length",
                self.period
            )));
        }

        if !(1..=MAX_SAMPLES_PER_PERIOD).contains(&self.samples_per_period) {
            return Err(AppError::InvalidConfig(format!(
                "samples per period must be between 1 and {}, got {}",
                MAX_SAMPLES_PER_PERIOD, self.samples_per_period
            )));
        }

        if self.period_count > MAX_PERIOD_COUNT {
            return Err(AppError::InvalidConfig(format!(
                "period count must be at most {}, got {}",
                MAX_PERIOD_COUNT, self.period_count
            )));
        }

        if self.fetch_concurrency == 0 {
            return Err(AppError::InvalidConfig(
                "fetch concurrency must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Total number of sample requests one run will issue.
    pub fn total_requests(&self) -> usize {
        self.samples_per_period.max(1) * self.period_count
    }

    /// Rows of (parameter, value) describing the active settings.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Symbol", self.symbol.clone()),
            ("Period", self.period.clone()),
            ("Samples/Period", self.samples_per_period.to_string()),
            ("Periods", self.period_count.to_string()),
            ("Provider", self.provider.clone()),
            ("Data Dir", self.data_dir.display().to_string()),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
