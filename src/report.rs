//! Terminal and JSON rendering of an evaluated batch.
//!
//! The core has no knowledge of formatting; everything presentation-related
//! lives here, including the audible alert.

use std::fmt::Write as _;
use std::io::Write as _;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::analysis::{classify, AnalysisBatch, AnalysisResult, Priority};
use crate::config::Config;
use crate::error::Result;

/// One classified entry of the rendered report.
#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    /// Priority tag for this result.
    pub priority: Priority,
    /// The underlying result.
    #[serde(flatten)]
    pub result: &'a AnalysisResult,
}

/// Classify every result in rank order.
pub fn classify_batch<'a>(batch: &'a AnalysisBatch, config: &Config) -> Vec<ReportEntry<'a>> {
    batch
        .results
        .iter()
        .map(|result| ReportEntry {
            priority: classify(result, config),
            result,
        })
        .collect()
}

/// Render the batch as a key/value text report, one block per result in
/// rank order (best candidates at the bottom, nearest the prompt).
pub fn render_text(batch: &AnalysisBatch, config: &Config) -> String {
    let mut out = String::new();

    for entry in classify_batch(batch, config) {
        let result = entry.result;

        writeln!(out).ok();
        writeln!(out, "[{}] {} (id {})", entry.priority, result.market_name, result.market_id).ok();
        writeln!(out, "  buy_no_prices: {:?}", result.buy_no_prices_cents).ok();
        writeln!(out, "  expected_profit: {}%", result.expected_profit_pct).ok();
        writeln!(out, "  guaranteed_profit: {}%", result.guaranteed_profit_pct).ok();

        if let Some(advantage) = result.sell_advantage_pct {
            writeln!(out, "  sell_shares_advantage: {}%", advantage).ok();
        }
        if let Some(prices) = &result.sell_no_prices_cents {
            writeln!(out, "  sell_no_prices: {:?}", prices).ok();
        }
        if let Some(date) = result.worth_purchasing_by {
            writeln!(out, "  worth_purchasing_by: {}", date).ok();
        }
    }

    if batch.results.is_empty() {
        writeln!(out, "no markets with an arbitrage signal this cycle").ok();
    }

    out
}

/// Render the classified batch as pretty JSON.
pub fn render_json(batch: &AnalysisBatch, config: &Config) -> Result<String> {
    #[derive(Serialize)]
    struct JsonReport<'a> {
        as_of: time::Date,
        alert: bool,
        results: Vec<ReportEntry<'a>>,
    }

    let report = JsonReport {
        as_of: batch.as_of,
        alert: batch.alert,
        results: classify_batch(batch, config),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Ring the terminal bell six times, one second apart.
pub async fn audible_alert() {
    info!("alert threshold crossed, ringing bell");

    for _ in 0..6 {
        print!("\x07");
        std::io::stdout().flush().ok();
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::date;

    fn batch() -> AnalysisBatch {
        AnalysisBatch {
            as_of: date!(2026 - 01 - 01),
            results: vec![AnalysisResult {
                market_id: 1,
                market_name: "Which party wins?".to_string(),
                buy_no_prices_cents: vec![40, 45, 50],
                guaranteed_profit_pct: dec!(53.50),
                expected_profit_pct: dec!(-5.12),
                sell_advantage_pct: None,
                sell_no_prices_cents: None,
                worth_purchasing_by: None,
            }],
            alert: true,
        }
    }

    #[test]
    fn text_report_contains_tag_and_fields() {
        let text = render_text(&batch(), &Config::default());

        assert!(text.contains("[ARBITRAGE] Which party wins? (id 1)"));
        assert!(text.contains("guaranteed_profit: 53.50%"));
        assert!(text.contains("buy_no_prices: [40, 45, 50]"));
        assert!(!text.contains("sell_shares_advantage"));
    }

    #[test]
    fn empty_batch_renders_placeholder() {
        let empty = AnalysisBatch {
            as_of: date!(2026 - 01 - 01),
            results: vec![],
            alert: false,
        };

        let text = render_text(&empty, &Config::default());
        assert!(text.contains("no markets"));
    }

    #[test]
    fn json_report_flattens_result_fields() {
        let json = render_json(&batch(), &Config::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["alert"], true);
        assert_eq!(value["results"][0]["priority"], "ARBITRAGE");
        assert_eq!(value["results"][0]["market_id"], 1);
        // Absent optional fields stay out of the payload.
        assert!(value["results"][0].get("sell_advantage_pct").is_none());
    }
}
