use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Query, State},
    http::HeaderMap,
};
use serde::Serialize;
use stock::{Quote, StockError, StockRecord};
use tracing::{Instrument, debug, info, info_span, instrument};

use super::query::{StockQuery, Symbols};
use crate::{AppState, Error};

#[derive(Debug, Serialize, PartialEq)]
pub struct StockPricesResponse {
    #[serde(rename = "stockData")]
    pub stock_data: StockData,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StockData {
    Single(SingleStock),
    Pair([PairEntry; 2]),
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SingleStock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub likes: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PairEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub rel_likes: i64,
}

pub async fn stock_prices(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<StockPricesResponse>, Error> {
    let query = StockQuery::from_pairs(&pairs)?;
    let liker_id = state.liker.identify(peer.ip(), &headers);

    let stock_data = lookup(&state, &query, &liker_id).await?;
    Ok(Json(StockPricesResponse { stock_data }))
}

#[instrument(name = "stock_prices", skip(state, liker_id), fields(like = query.like))]
pub async fn lookup(
    state: &AppState,
    query: &StockQuery,
    liker_id: &str,
) -> Result<StockData, Error> {
    match &query.symbols {
        Symbols::One(symbol) => single(state, symbol, query.like, liker_id).await,
        Symbols::Pair(first, second) => pair(state, first, second, query.like, liker_id).await,
    }
}

async fn single(
    state: &AppState,
    symbol: &str,
    like: bool,
    liker_id: &str,
) -> Result<StockData, Error> {
    let Some(quote) = resolve(state.price_client.fetch_quote(symbol).await)? else {
        info!(%symbol, "symbol not resolved upstream");
        return Ok(StockData::Single(SingleStock {
            stock: None,
            price: None,
            likes: usize::from(like),
        }));
    };

    let record = state.like_store.upsert(&quote.symbol, like, liker_id).await?;
    debug!(symbol = %record.symbol, likes = record.likes(), "single lookup done");

    Ok(StockData::Single(SingleStock {
        stock: Some(quote.symbol),
        price: quote.price,
        likes: record.likes(),
    }))
}

async fn pair(
    state: &AppState,
    first: &str,
    second: &str,
    like: bool,
    liker_id: &str,
) -> Result<StockData, Error> {
    let (first_quote, second_quote) = tokio::join!(
        state
            .price_client
            .fetch_quote(first)
            .instrument(info_span!("quote", symbol = %first)),
        state
            .price_client
            .fetch_quote(second)
            .instrument(info_span!("quote", symbol = %second)),
    );
    let first_quote = resolve(first_quote)?;
    let second_quote = resolve(second_quote)?;

    let (first_record, second_record) = tokio::try_join!(
        state
            .like_store
            .upsert(record_key(first, &first_quote), like, liker_id),
        state
            .like_store
            .upsert(record_key(second, &second_quote), like, liker_id),
    )?;

    Ok(StockData::Pair([
        pair_entry(first_quote, &first_record, &second_record),
        pair_entry(second_quote, &second_record, &first_record),
    ]))
}

/// Turns the unresolved-symbol error into `None`; other errors pass through.
fn resolve(result: Result<Quote, StockError>) -> Result<Option<Quote>, StockError> {
    match result {
        Ok(quote) => Ok(Some(quote)),
        Err(StockError::QuoteUnavailable(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Records are keyed by the upstream symbol when it resolved, else by what was asked for.
fn record_key<'a>(requested: &'a str, quote: &'a Option<Quote>) -> &'a str {
    quote.as_ref().map_or(requested, |q| q.symbol.as_str())
}

fn pair_entry(quote: Option<Quote>, own: &StockRecord, other: &StockRecord) -> PairEntry {
    let rel_likes = own.likes() as i64 - other.likes() as i64;
    match quote {
        Some(quote) => PairEntry {
            stock: Some(quote.symbol),
            price: quote.price,
            rel_likes,
        },
        None => PairEntry {
            stock: None,
            price: None,
            rel_likes,
        },
    }
}
