use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Result, StockError};

pub const DEFAULT_QUOTE_API: &str = "https://stock-price-checker-proxy.freecodecamp.rocks";

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: Option<f64>,
}

/// Anything that can resolve a ticker to its latest quote.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Returns `StockError::QuoteUnavailable` when the upstream does not know the symbol.
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote>;
}

#[derive(Clone)]
pub struct PriceClient {
    client: Client,
    base_api: String,
}

impl PriceClient {
    pub fn new(base_api: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StockError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_api: base_api.into(),
        })
    }

    /// Create a PriceClient from environment variables.
    /// Reads QUOTE_API_URL and QUOTE_TIMEOUT_SECS, both optional.
    pub fn from_env() -> Result<Self> {
        let base_api =
            std::env::var("QUOTE_API_URL").unwrap_or_else(|_| DEFAULT_QUOTE_API.to_string());
        let timeout = match std::env::var("QUOTE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| StockError::Config(format!("invalid QUOTE_TIMEOUT_SECS: {raw}")))?,
            Err(_) => 10,
        };
        Self::new(base_api, Duration::from_secs(timeout))
    }

    fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}/v1/stock/{}/quote",
            self.base_api.trim_end_matches('/'),
            urlencoding::encode(symbol.trim())
        )
    }
}

#[async_trait]
impl QuoteSource for PriceClient {
    #[instrument(name = "fetch_quote", skip(self))]
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        let body: Value = self
            .client
            .get(self.quote_url(symbol))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let quote = parse_quote(symbol, &body)?;
        debug!(resolved = %quote.symbol, price = ?quote.price, "quote fetched");
        Ok(quote)
    }
}

//
// The proxy answers a bare JSON string ("Invalid symbol", "Unknown symbol")
// for tickers it cannot resolve, and an IEX style quote object otherwise.
//
pub fn parse_quote(requested: &str, body: &Value) -> Result<Quote> {
    let Some(obj) = body.as_object() else {
        return Err(StockError::QuoteUnavailable(requested.to_string()));
    };

    let symbol = match obj.get("symbol").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => return Err(StockError::QuoteUnavailable(requested.to_string())),
    };

    let price = match obj.get("latestPrice") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_f64().ok_or_else(|| {
            StockError::Upstream(format!("latestPrice is not a number for {symbol}: {v}"))
        })?),
    };

    Ok(Quote { symbol, price })
}
