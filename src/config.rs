//! Application configuration loaded from environment variables.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::analysis::RankField;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Snapshot Source ===
    /// PredictIt marketdata endpoint returning the full snapshot.
    #[serde(default = "default_api_url")]
    pub predictit_api_url: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Analysis Parameters ===
    /// Market IDs where the position is already built to capacity.
    /// These get the sell-advantage treatment instead of the breakeven date.
    #[serde(default)]
    pub maxed_market_ids: Vec<i64>,

    /// Required annual return rate used for the breakeven horizon (0.4 = 40%/yr).
    #[serde(default = "default_annual_return_rate")]
    pub annual_return_rate: Decimal,

    /// Profit threshold above which a market requests the audible alert.
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: Decimal,

    /// Field the ranked output is sorted by.
    #[serde(default)]
    pub sort_field: RankField,

    // === Polling ===
    /// Base delay between polling cycles, in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Upper bound of the uniform random jitter added to each delay, in seconds.
    #[serde(default = "default_poll_jitter")]
    pub poll_jitter_secs: u64,

    // === Observability ===
    /// Enable the Prometheus metrics listener.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Port for the Prometheus metrics listener.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_api_url() -> String {
    "https://www.predictit.org/api/marketdata/all".to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_annual_return_rate() -> Decimal {
    Decimal::new(4, 1) // 0.4
}

fn default_alert_threshold() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_poll_interval() -> u64 {
    50
}

fn default_poll_jitter() -> u64 {
    20
}

fn default_true() -> bool {
    true
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.predictit_api_url.starts_with("http") {
            return Err("PREDICTIT_API_URL must be an http(s) URL".to_string());
        }

        if self.annual_return_rate <= Decimal::ZERO {
            return Err("ANNUAL_RETURN_RATE must be positive".to_string());
        }

        if self.alert_threshold < Decimal::ZERO {
            return Err("ALERT_THRESHOLD must not be negative".to_string());
        }

        if self.poll_interval_secs == 0 {
            return Err("POLL_INTERVAL_SECS must be at least 1".to_string());
        }

        Ok(())
    }

    /// Check whether a market's position is already built to capacity.
    pub fn is_maxed(&self, market_id: i64) -> bool {
        self.maxed_market_ids.contains(&market_id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predictit_api_url: default_api_url(),
            http_timeout_ms: default_http_timeout_ms(),
            maxed_market_ids: Vec::new(),
            annual_return_rate: default_annual_return_rate(),
            alert_threshold: default_alert_threshold(),
            sort_field: RankField::default(),
            poll_interval_secs: default_poll_interval(),
            poll_jitter_secs: default_poll_jitter(),
            metrics_enabled: default_true(),
            metrics_port: default_metrics_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}
