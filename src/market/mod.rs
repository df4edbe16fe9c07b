//! Market module for the PredictIt snapshot.
//!
//! This module handles:
//! - Snapshot data model (markets and their outcome contracts)
//! - PredictIt marketdata API client

pub mod client;
pub mod types;

pub use client::PredictItClient;
pub use types::{Contract, Market, MarketSnapshot};
