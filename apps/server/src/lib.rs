use std::sync::Arc;

use stock::{LikeStore, QuoteSource};

pub mod api;
pub mod config;
pub mod error;
pub mod liker;

use liker::LikerPolicy;

#[derive(Clone)]
pub struct AppState {
    pub like_store: Arc<dyn LikeStore>,
    pub price_client: Arc<dyn QuoteSource>,
    pub liker: LikerPolicy,
}

pub type Error = error::ApiError;
