//! Market evaluation engine.
//!
//! This module handles:
//! - Pure per-market profit calculations
//! - Per-snapshot result assembly and alert accumulation
//! - Ranking of built results
//! - Priority classification for display

pub mod builder;
pub mod calculator;
pub mod classifier;
pub mod ranker;

pub use builder::{evaluate_market, evaluate_snapshot, AnalysisBatch, AnalysisResult, MarketEvaluation};
pub use calculator::{
    days_to_breakeven, expected_profit, guaranteed_profit, sell_advantage, yes_probabilities,
};
pub use classifier::{classify, Priority};
pub use ranker::{rank_results, RankField};
