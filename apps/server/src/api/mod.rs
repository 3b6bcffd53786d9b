pub mod query;
mod stock_prices;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/stock-prices", get(stock_prices::stock_prices))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
