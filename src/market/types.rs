//! Market data model for the PredictIt snapshot.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One outcome leg of a market, with independently quoted prices.
///
/// Each price is a fraction in [0, 1]; `None` means no liquidity exists on
/// that side and is a normal condition, never an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Cheapest price to buy a "Yes" share.
    #[serde(default)]
    pub best_buy_yes_cost: Option<Decimal>,

    /// Cheapest price to buy a "No" share.
    #[serde(default)]
    pub best_buy_no_cost: Option<Decimal>,

    /// Best price obtainable selling a held "No" share.
    #[serde(default)]
    pub best_sell_no_cost: Option<Decimal>,
}

/// A named question with 2+ mutually exclusive outcome contracts.
///
/// Contract order is stable and aligns prices with probabilities
/// index-for-index within one evaluation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Unique market identifier.
    pub id: i64,
    /// Market question text.
    pub name: String,
    /// Ordered outcome contracts; exactly one resolves "Yes".
    pub contracts: Vec<Contract>,
}

impl Market {
    /// Observed No-buy prices, index-aligned with `contracts`.
    pub fn buy_no_prices(&self) -> Vec<Option<Decimal>> {
        self.contracts.iter().map(|c| c.best_buy_no_cost).collect()
    }

    /// Observed sell-No prices, index-aligned with `contracts`.
    pub fn sell_no_prices(&self) -> Vec<Option<Decimal>> {
        self.contracts.iter().map(|c| c.best_sell_no_cost).collect()
    }
}

/// One polling cycle's full set of markets.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// All markets quoted in this cycle.
    pub markets: Vec<Market>,
}
