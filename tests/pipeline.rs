//! End-to-end pipeline tests: snapshot -> evaluate -> rank -> classify.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::date;
use time::Date;

use predictit_scanner::analysis::{
    classify, evaluate_snapshot, rank_results, yes_probabilities, Priority, RankField,
};
use predictit_scanner::config::Config;
use predictit_scanner::market::{Contract, Market, MarketSnapshot};

const AS_OF: Date = date!(2026 - 01 - 01);

fn contract(
    yes: Option<Decimal>,
    no: Option<Decimal>,
    sell_no: Option<Decimal>,
) -> Contract {
    Contract {
        best_buy_yes_cost: yes,
        best_buy_no_cost: no,
        best_sell_no_cost: sell_no,
    }
}

fn no_market(id: i64, name: &str, prices: &[Option<Decimal>]) -> Market {
    Market {
        id,
        name: name.to_string(),
        contracts: prices.iter().map(|p| contract(None, *p, None)).collect(),
    }
}

#[test]
fn full_cycle_on_mixed_snapshot() {
    let snapshot = MarketSnapshot {
        markets: vec![
            // Clear arbitrage, the worked example.
            no_market(
                1,
                "arbitrage",
                &[Some(dec!(0.40)), Some(dec!(0.45)), Some(dec!(0.50))],
            ),
            // Single quote: excluded entirely.
            no_market(2, "illiquid", &[Some(dec!(0.40)), None]),
            // Signal exists but deeply unprofitable.
            no_market(3, "overpriced", &[Some(dec!(0.95)), Some(dec!(0.97))]),
            // Fully invested with a favorable liquidation.
            Market {
                id: 6653,
                name: "maxed".to_string(),
                contracts: vec![
                    contract(None, Some(dec!(0.30)), Some(dec!(0.60))),
                    contract(None, Some(dec!(0.30)), Some(dec!(0.55))),
                ],
            },
        ],
    };
    let config = Config {
        maxed_market_ids: vec![6653],
        ..Config::default()
    };

    let mut batch = evaluate_snapshot(&snapshot, &config, AS_OF);
    rank_results(&mut batch.results, config.sort_field);

    // Market 2 is gone; the rest survive.
    let ids: Vec<i64> = batch.results.iter().map(|r| r.market_id).collect();
    assert!(!ids.contains(&2));
    assert_eq!(batch.results.len(), 3);

    // The favorable-liquidation market always ranks last.
    assert_eq!(*ids.last().unwrap(), 6653);

    // Worked example values survived the pipeline.
    let arb = batch.results.iter().find(|r| r.market_id == 1).unwrap();
    assert_eq!(arb.guaranteed_profit_pct, dec!(53.50));
    assert_eq!(arb.buy_no_prices_cents, vec![40, 45, 50]);

    // Both the arbitrage and the sell-advantage request the alert.
    assert!(batch.alert);

    // Classification in display order.
    let tags: Vec<Priority> = batch
        .results
        .iter()
        .map(|r| classify(r, &config))
        .collect();
    assert!(tags.contains(&Priority::Arbitrage));
    assert_eq!(*tags.last().unwrap(), Priority::Held);
}

#[test]
fn alert_iff_threshold_crossed() {
    let config = Config {
        maxed_market_ids: vec![9],
        ..Config::default()
    };

    // Nothing crosses: guaranteed profit negative everywhere, maxed market
    // with an unfavorable liquidation.
    let quiet = MarketSnapshot {
        markets: vec![
            no_market(1, "dull", &[Some(dec!(0.95)), Some(dec!(0.97))]),
            Market {
                id: 9,
                name: "maxed".to_string(),
                contracts: vec![
                    contract(None, Some(dec!(0.50)), Some(dec!(0.30))),
                    contract(None, Some(dec!(0.50)), Some(dec!(0.30))),
                ],
            },
        ],
    };
    assert!(!evaluate_snapshot(&quiet, &config, AS_OF).alert);

    // A maxed market's favorable liquidation alone trips the flag.
    let liquidate = MarketSnapshot {
        markets: vec![Market {
            id: 9,
            name: "maxed".to_string(),
            contracts: vec![
                contract(None, Some(dec!(0.30)), Some(dec!(0.60))),
                contract(None, Some(dec!(0.30)), Some(dec!(0.55))),
            ],
        }],
    };
    assert!(evaluate_snapshot(&liquidate, &config, AS_OF).alert);

    // Guaranteed profit on a maxed market is moot: no alert.
    let maxed_arb = MarketSnapshot {
        markets: vec![Market {
            id: 9,
            name: "maxed".to_string(),
            contracts: vec![
                contract(None, Some(dec!(0.40)), Some(dec!(0.10))),
                contract(None, Some(dec!(0.45)), Some(dec!(0.10))),
            ],
        }],
    };
    assert!(!evaluate_snapshot(&maxed_arb, &config, AS_OF).alert);
}

#[test]
fn probabilities_normalize_for_arbitrary_quote_combinations() {
    let cases = vec![
        vec![
            contract(Some(dec!(0.55)), Some(dec!(0.47)), None),
            contract(None, Some(dec!(0.60)), None),
        ],
        vec![
            contract(Some(dec!(0.01)), Some(dec!(0.99)), None),
            contract(Some(dec!(0.99)), Some(dec!(0.01)), None),
            contract(None, None, None),
        ],
        vec![
            contract(None, Some(dec!(0.33)), None),
            contract(None, Some(dec!(0.33)), None),
            contract(None, Some(dec!(0.33)), None),
        ],
    ];

    for contracts in cases {
        let market = Market {
            id: 1,
            name: "normalize".to_string(),
            contracts,
        };
        let total: Decimal = yes_probabilities(&market).unwrap().iter().sum();
        assert!(
            (total - Decimal::ONE).abs() < dec!(0.000000001),
            "probabilities summed to {}",
            total
        );
    }
}

#[test]
fn ranker_override_holds_for_both_fields() {
    let snapshot = MarketSnapshot {
        markets: vec![
            no_market(1, "good", &[Some(dec!(0.40)), Some(dec!(0.45))]),
            no_market(2, "bad", &[Some(dec!(0.90)), Some(dec!(0.92))]),
            Market {
                id: 9,
                name: "maxed".to_string(),
                contracts: vec![
                    contract(None, Some(dec!(0.30)), Some(dec!(0.60))),
                    contract(None, Some(dec!(0.30)), Some(dec!(0.55))),
                ],
            },
        ],
    };
    let config = Config {
        maxed_market_ids: vec![9],
        ..Config::default()
    };

    for field in [RankField::ExpectedProfit, RankField::GuaranteedProfit] {
        let mut batch = evaluate_snapshot(&snapshot, &config, AS_OF);
        rank_results(&mut batch.results, field);
        assert_eq!(batch.results.last().unwrap().market_id, 9);
    }
}

#[test]
fn degenerate_market_is_skipped_not_fatal() {
    // Two contracts quoted at yes 0.00 / no 1.00 derive a Yes-probability
    // of zero each, so the probability mass cannot be normalized. The
    // market is dropped with an error while the rest of the batch survives.
    let degenerate = Market {
        id: 7,
        name: "degenerate".to_string(),
        contracts: vec![
            contract(Some(dec!(0.00)), Some(dec!(1.00)), None),
            contract(Some(dec!(0.00)), Some(dec!(1.00)), None),
        ],
    };
    let snapshot = MarketSnapshot {
        markets: vec![
            degenerate,
            no_market(1, "fine", &[Some(dec!(0.40)), Some(dec!(0.45))]),
        ],
    };
    let config = Config::default();

    let batch = evaluate_snapshot(&snapshot, &config, AS_OF);

    let ids: Vec<i64> = batch.results.iter().map(|r| r.market_id).collect();
    assert!(ids.contains(&1));
    assert!(!ids.contains(&7));
}

/// Live fetch against the real PredictIt API.
#[tokio::test]
#[ignore = "hits the live PredictIt API"]
async fn live_snapshot_parses() {
    use predictit_scanner::market::PredictItClient;

    let config = Config::default();
    let client = PredictItClient::new(&config);

    let snapshot = client.fetch_snapshot().await.expect("fetch failed");
    assert!(!snapshot.markets.is_empty());

    for market in snapshot.markets.iter().take(5) {
        println!("{} ({} contracts)", market.name, market.contracts.len());
    }
}
