//! PredictIt arbitrage and expected-value scanner.
//!
//! Polls the PredictIt marketdata snapshot and evaluates every market for
//! guaranteed, fee-adjusted arbitrage from buying No across all contracts,
//! flagging the best candidates to a human operator.
//!
//! # Strategy
//!
//! Exactly one contract per market resolves Yes, so holding one No share in
//! every contract pays out on all but one of them. If the fee-adjusted
//! payout exceeds the cost of the structure, profit is locked in regardless
//! of outcome:
//!
//! ```text
//! No prices:  [0.40, 0.45, 0.50]
//! Payout:     0.50 + 0.9*0.60 + 0.9*0.55 = 1.535
//! Stake:      1.00
//! ──────────────────────────────
//! Guaranteed: 53.50% ✅
//! ```
//!
//! This is a read-only analysis tool: it never places orders and keeps no
//! state across polling cycles.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Snapshot data model and PredictIt client
//! - [`analysis`]: Evaluation engine, ranking and classification
//! - [`report`]: Terminal/JSON rendering and the audible alert
//! - [`metrics`]: Prometheus metrics

pub mod analysis;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod report;

pub use config::Config;
pub use error::{Result, ScannerError};
