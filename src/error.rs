//! Unified error types for the scanner.

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the scanner.
#[derive(Error, Debug)]
pub enum ScannerError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Snapshot fetch/parse error.
    #[error("market error: {0}")]
    Market(#[from] MarketError),

    /// Market evaluation error.
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Snapshot fetch and parse errors.
#[derive(Error, Debug)]
pub enum MarketError {
    /// The marketdata endpoint returned a non-success status.
    #[error("snapshot fetch failed: HTTP {status}")]
    FetchFailed {
        /// HTTP status code returned.
        status: u16,
    },

    /// Failed to parse the snapshot body.
    #[error("failed to parse snapshot: {0}")]
    ParseError(String),

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Domain errors raised while evaluating a single market.
///
/// These exclude the offending market from the batch; they never abort
/// the whole cycle.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Every derived Yes-probability was zero; normalization is impossible.
    #[error("probability mass is zero, cannot normalize")]
    ZeroProbabilityMass,

    /// Breakeven horizon is undefined when guaranteed profit is exactly zero.
    #[error("breakeven horizon undefined: guaranteed profit is zero")]
    ZeroGuaranteedProfit,

    /// The breakeven log argument must be strictly positive.
    #[error("breakeven ratio {ratio} is not positive, logarithm undefined")]
    NonPositiveLogRatio {
        /// The computed `(guaranteed - expected) / guaranteed` ratio.
        ratio: Decimal,
    },

    /// The computed horizon does not fit in a day count.
    #[error("breakeven horizon out of range")]
    HorizonOutOfRange,
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ScannerError>;
