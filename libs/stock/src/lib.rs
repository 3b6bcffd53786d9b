mod error;
mod like_store;
mod memory_store;
mod price_client;
mod redis_store;

use std::sync::Arc;

pub use error::{Result, StockError};
pub use like_store::{LikeStore, StockRecord, normalize};
pub use memory_store::MemoryLikeStore;
pub use price_client::{DEFAULT_QUOTE_API, PriceClient, Quote, QuoteSource, parse_quote};
pub use redis_store::RedisLikeStore;

pub const MEMORY_URL: &str = "memory://";

/// Open the like store named by a connection string.
/// `memory://` selects the in-process store, anything else is handed to Redis.
pub async fn open_store(db_url: &str, key_prefix: &str) -> Result<Arc<dyn LikeStore>> {
    if db_url.trim() == MEMORY_URL {
        tracing::warn!("using in-memory like store, likes will not survive a restart");
        return Ok(Arc::new(MemoryLikeStore::new()));
    }

    let store = RedisLikeStore::connect(db_url, key_prefix).await?;
    Ok(Arc::new(store))
}
