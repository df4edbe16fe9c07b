//! Priority classification for display.

use serde::Serialize;
use strum::Display;

use crate::config::Config;

use super::builder::AnalysisResult;

/// Priority tag for one result, first match wins.
///
/// Drives presentation only; it has no effect on ranking or alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Position already built to capacity.
    Held,
    /// Guaranteed profit above the threshold.
    Arbitrage,
    /// Selling the held position now beats holding to resolution.
    LiquidateNow,
    /// Positive expectation without an arbitrage lock.
    PositiveExpectation,
    /// Nothing notable.
    None,
}

/// Classify one result against the configured threshold.
pub fn classify(result: &AnalysisResult, config: &Config) -> Priority {
    let threshold = config.alert_threshold;

    if config.is_maxed(result.market_id) {
        return Priority::Held;
    }

    if result.guaranteed_profit_pct > threshold {
        return Priority::Arbitrage;
    }

    if matches!(result.sell_advantage_pct, Some(a) if a > threshold) {
        return Priority::LiquidateNow;
    }

    if result.expected_profit_pct > threshold {
        return Priority::PositiveExpectation;
    }

    Priority::None
}
