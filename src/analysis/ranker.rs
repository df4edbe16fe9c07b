//! Ordering of built results.

use rust_decimal::Decimal;
use serde::Deserialize;
use strum::{Display, EnumString};

use super::builder::AnalysisResult;

/// Field the batch is sorted by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RankField {
    /// Sort by probability-weighted expected profit.
    #[default]
    ExpectedProfit,
    /// Sort by fee-adjusted guaranteed profit.
    GuaranteedProfit,
}

/// Sort key for one result under the chosen field.
///
/// A fully-invested market already in a favorable liquidation position is
/// deprioritized for "should I open a new position" ranking: a positive
/// sell-advantage sorts after everything else, regardless of field.
fn sort_key(result: &AnalysisResult, field: RankField) -> Decimal {
    if matches!(result.sell_advantage_pct, Some(a) if a > Decimal::ZERO) {
        return Decimal::MAX;
    }

    match field {
        RankField::ExpectedProfit => result.expected_profit_pct,
        RankField::GuaranteedProfit => result.guaranteed_profit_pct,
    }
}

/// Sort the batch ascending by the chosen field. Stable.
pub fn rank_results(results: &mut [AnalysisResult], field: RankField) {
    results.sort_by_key(|r| sort_key(r, field));
}
