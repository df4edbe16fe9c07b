//! Pure per-market profit calculations.
//!
//! All functions here are stateless: they read one [`Market`]'s quotes and
//! derive a metric, never touching anything outside their arguments.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::AnalysisError;
use crate::market::Market;

/// Fraction of winnings retained after the exchange's 10% fee.
pub const FEE_RETAINED: Decimal = dec!(0.9);

const DAYS_PER_YEAR: Decimal = dec!(365);

/// Guaranteed net return fraction on one unit of capital, from buying one
/// No share in every quoted contract.
///
/// Needs at least two independent No quotes; fewer means no outcome-proof
/// position exists and the result is `None`. The most expensive No leg is
/// the one that loses when its contract resolves Yes, so it pays out
/// fee-free at most once; every other leg's winnings carry the fee.
///
/// The result may be negative. "Computed" never means "profitable".
pub fn guaranteed_profit(market: &Market) -> Option<Decimal> {
    let mut prices: Vec<Decimal> = market.buy_no_prices().into_iter().flatten().collect();

    if prices.len() < 2 {
        return None;
    }

    prices.sort();
    let unfeed_leg = prices.pop()?;

    let mut profit = Decimal::ONE - unfeed_leg;
    for price in prices {
        profit += FEE_RETAINED * (Decimal::ONE - price);
    }

    // One full unit of stake funds the whole structure.
    Some(profit - Decimal::ONE)
}

/// Yes-probability per contract, normalized to sum to exactly 1.
///
/// A contract with no No quote cannot be Yes-priced meaningfully and gets
/// probability 0; one with a No quote but no Yes quote gets 1; otherwise the
/// midpoint of the two independent Yes-price signals. Quoted prices across
/// contracts need not sum to 1 due to spread and fees; normalization
/// corrects for that.
pub fn yes_probabilities(market: &Market) -> Result<Vec<Decimal>, AnalysisError> {
    let raw: Vec<Decimal> = market
        .contracts
        .iter()
        .map(|c| match (c.best_buy_no_cost, c.best_buy_yes_cost) {
            (None, _) => Decimal::ZERO,
            (Some(_), None) => Decimal::ONE,
            (Some(no), Some(yes)) => (yes + (Decimal::ONE - no)) / dec!(2),
        })
        .collect();

    let total: Decimal = raw.iter().sum();
    if total.is_zero() {
        return Err(AnalysisError::ZeroProbabilityMass);
    }

    Ok(raw.into_iter().map(|p| p / total).collect())
}

/// Probability-weighted expected return fraction from buying No on every
/// contract that has a quote, net of the fee, reduced by the expected loss
/// from contracts that resolve Yes.
pub fn expected_profit(market: &Market) -> Result<Decimal, AnalysisError> {
    let probabilities = yes_probabilities(market)?;

    let mut profit = Decimal::ZERO;
    for (contract, yes_probability) in market.contracts.iter().zip(probabilities) {
        // No quote on this side: the position cannot be taken.
        let Some(loss_if_yes) = contract.best_buy_no_cost else {
            continue;
        };

        let no_probability = Decimal::ONE - yes_probability;
        let gain_if_no = Decimal::ONE - loss_if_yes;

        profit += FEE_RETAINED * no_probability * gain_if_no - yes_probability * loss_if_yes;
    }

    Ok(profit)
}

/// Surplus (or deficit) of liquidating one held No share per contract right
/// now versus holding the full structure to resolution, which pays exactly
/// one unit.
///
/// Only meaningful for markets where the position is already built to
/// capacity. Positive means selling immediately beats waiting.
pub fn sell_advantage(market: &Market) -> Decimal {
    let contract_count = Decimal::from(market.contracts.len() as u64);
    let proceeds: Decimal = market.sell_no_prices().into_iter().flatten().sum();

    Decimal::ONE - contract_count + proceeds
}

/// Holding period, in days, at which the capital-opportunity cost at the
/// required annual return rate equals the computed edge.
///
/// Operates on the percent-scaled profit values stored on a built result:
/// `round(ln((g - e) / g) / rate * 365)`. Negative output is legal and
/// means the opportunity is already below the required-return threshold;
/// no clamping happens here.
///
/// Degenerate inputs are explicit errors rather than NaN/infinity: a zero
/// guaranteed profit divides by zero, and a non-positive log argument has
/// no defined horizon.
pub fn days_to_breakeven(
    guaranteed_pct: Decimal,
    expected_pct: Decimal,
    annual_return_rate: Decimal,
) -> Result<i64, AnalysisError> {
    if guaranteed_pct.is_zero() {
        return Err(AnalysisError::ZeroGuaranteedProfit);
    }

    let ratio = (guaranteed_pct - expected_pct) / guaranteed_pct;
    if ratio <= Decimal::ZERO {
        return Err(AnalysisError::NonPositiveLogRatio { ratio });
    }

    let horizon = ratio
        .checked_ln()
        .ok_or(AnalysisError::NonPositiveLogRatio { ratio })?
        / annual_return_rate
        * DAYS_PER_YEAR;

    horizon
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(AnalysisError::HorizonOutOfRange)
}
