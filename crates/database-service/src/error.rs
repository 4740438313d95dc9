use thiserror::Error;

/// Failures resolving a legacy import path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error(
        "stale forward: {legacy}::{symbol} should name {canonical}::{symbol} but resolves to {resolved}"
    )]
    StaleForward {
        legacy: String,
        canonical: String,
        symbol: String,
        resolved: String,
    },

    #[error("unknown legacy path: {0}")]
    UnknownLegacyPath(String),

    #[error("legacy path {legacy} does not export {symbol}")]
    SymbolNotExported { legacy: String, symbol: String },
}

/// Validation errors for the domain models.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("invalid email address: {0:?}")]
    InvalidAddress(String),

    #[error("an email record needs at least one recipient")]
    NoRecipients,
}
