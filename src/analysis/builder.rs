//! Per-snapshot result assembly.
//!
//! Applies the calculators to every market in a snapshot, drops markets
//! with no arbitrage signal, and assembles one immutable [`AnalysisResult`]
//! per retained market. Alert requests surface as explicit return values
//! and are OR-ed into the batch flag; there is no hidden mutable state.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use time::{Date, Duration};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::market::{Market, MarketSnapshot};

use super::calculator;

/// The engine's output for one retained market.
///
/// Built fresh each polling cycle, never mutated after construction,
/// discarded at the end of the cycle.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Market identifier.
    pub market_id: i64,
    /// Market question text.
    pub market_name: String,
    /// Observed No-buy prices, percent-scaled and rounded.
    pub buy_no_prices_cents: Vec<i64>,
    /// Guaranteed profit, percent-scaled, 2 decimal places. May be negative.
    pub guaranteed_profit_pct: Decimal,
    /// Expected profit, percent-scaled, 2 decimal places.
    pub expected_profit_pct: Decimal,
    /// Sell-advantage, percent-scaled; fully-invested markets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_advantage_pct: Option<Decimal>,
    /// Sell-No prices in cents; fully-invested markets with a positive
    /// advantage only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_no_prices_cents: Option<Vec<i64>>,
    /// Date by which opening the position still clears the required return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worth_purchasing_by: Option<Date>,
}

/// One market's evaluation together with its alert request.
#[derive(Debug, Clone)]
pub struct MarketEvaluation {
    /// The assembled result.
    pub result: AnalysisResult,
    /// Whether this market crossed an alert threshold.
    pub alert: bool,
}

/// One cycle's evaluated snapshot: retained results plus the alert flag.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBatch {
    /// The date the evaluation ran, used for breakeven dates.
    pub as_of: Date,
    /// Retained results, in builder order until ranked.
    pub results: Vec<AnalysisResult>,
    /// OR of all per-market alert requests.
    pub alert: bool,
}

/// Percent-scale a fraction, rounded to 2 decimal places.
fn percent(value: Decimal) -> Decimal {
    (value * Decimal::ONE_HUNDRED).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Percent-scale present prices, rounded to the nearest whole cent.
fn cents(prices: Vec<Option<Decimal>>) -> Vec<i64> {
    prices
        .into_iter()
        .flatten()
        .map(|p| {
            (p * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .unwrap_or(0)
        })
        .collect()
}

/// Evaluate a single market.
///
/// `Ok(None)` means the market has no guaranteed-profit signal (fewer than
/// two No quotes) and is excluded from the batch; that is a normal
/// condition, not an error. Domain errors apply to this market only.
pub fn evaluate_market(
    market: &Market,
    config: &Config,
    as_of: Date,
) -> Result<Option<MarketEvaluation>, AnalysisError> {
    let Some(guaranteed) = calculator::guaranteed_profit(market) else {
        return Ok(None);
    };

    let maxed = config.is_maxed(market.id);
    // A maxed market's guaranteed-profit signal is moot: the position
    // cannot be grown.
    let mut alert = !maxed && guaranteed >= config.alert_threshold;

    let expected = calculator::expected_profit(market)?;

    let mut result = AnalysisResult {
        market_id: market.id,
        market_name: market.name.clone(),
        buy_no_prices_cents: cents(market.buy_no_prices()),
        guaranteed_profit_pct: percent(guaranteed),
        expected_profit_pct: percent(expected),
        sell_advantage_pct: None,
        sell_no_prices_cents: None,
        worth_purchasing_by: None,
    };

    if maxed {
        let advantage = calculator::sell_advantage(market);
        if advantage > config.alert_threshold {
            alert = true;
        }
        if advantage > Decimal::ZERO {
            result.sell_no_prices_cents = Some(cents(market.sell_no_prices()));
        }
        result.sell_advantage_pct = Some(percent(advantage));
    } else if result.expected_profit_pct > Decimal::ZERO
        && result.guaranteed_profit_pct < Decimal::ZERO
    {
        let days = calculator::days_to_breakeven(
            result.guaranteed_profit_pct,
            result.expected_profit_pct,
            config.annual_return_rate,
        )?;
        let date = as_of
            .checked_add(Duration::days(days))
            .ok_or(AnalysisError::HorizonOutOfRange)?;
        result.worth_purchasing_by = Some(date);
    }

    Ok(Some(MarketEvaluation { result, alert }))
}

/// Evaluate every market in the snapshot.
///
/// Markets without a signal are dropped silently; markets hitting a domain
/// error are dropped with a warning. The batch always survives.
pub fn evaluate_snapshot(snapshot: &MarketSnapshot, config: &Config, as_of: Date) -> AnalysisBatch {
    let mut results = Vec::new();
    let mut alert = false;

    for market in &snapshot.markets {
        match evaluate_market(market, config, as_of) {
            Ok(Some(evaluation)) => {
                alert |= evaluation.alert;
                results.push(evaluation.result);
            }
            Ok(None) => {}
            Err(e) => {
                crate::metrics::inc_markets_skipped();
                warn!(
                    market_id = market.id,
                    market_name = %market.name,
                    error = %e,
                    "skipping market: evaluation failed"
                );
            }
        }
    }

    debug!(
        retained = results.len(),
        total = snapshot.markets.len(),
        alert,
        "snapshot evaluated"
    );

    AnalysisBatch {
        as_of,
        results,
        alert,
    }
}
