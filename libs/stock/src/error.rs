//! Error kinds surfaced by the quote client and the like store.
use thiserror::Error;

pub type Result<T, E = StockError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The upstream answered but could not resolve the symbol.
    #[error("quote unavailable for symbol: {0}")]
    QuoteUnavailable(String),

    /// Transport failure, timeout, non-2xx status or malformed body from the quote service.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The persistence backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),
}

impl StockError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StockError::QuoteUnavailable(_))
    }
}

impl From<reqwest::Error> for StockError {
    fn from(err: reqwest::Error) -> Self {
        StockError::Upstream(err.to_string())
    }
}

impl From<fred::error::Error> for StockError {
    fn from(err: fred::error::Error) -> Self {
        StockError::Storage(err.to_string())
    }
}
