//! Error types for the market data crate.
//!
//! Adapters and extractors are total functions and never fail; the errors
//! here only cover provider names, which arrive as free text.

use thiserror::Error;

/// Errors that can occur while interpreting market data identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// The provider name is not one of the known providers.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}
