use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::like_store::{LikeStore, StockRecord, normalize};

/// In-process store, selected with `DB=memory://`. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryLikeStore {
    records: Mutex<HashMap<String, HashSet<String>>>,
}

impl MemoryLikeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeStore for MemoryLikeStore {
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<StockRecord>> {
        let symbol = normalize(symbol);
        let records = self.records.lock().await;

        Ok(records.get(&symbol).map(|likers| StockRecord {
            symbol,
            likers: likers.clone(),
        }))
    }

    async fn create(
        &self,
        symbol: &str,
        register_liker: bool,
        liker_id: &str,
    ) -> Result<StockRecord> {
        let symbol = normalize(symbol);
        let mut likers = HashSet::new();
        if register_liker {
            likers.insert(liker_id.to_string());
        }

        self.records
            .lock()
            .await
            .insert(symbol.clone(), likers.clone());

        Ok(StockRecord { symbol, likers })
    }

    async fn upsert(
        &self,
        symbol: &str,
        register_liker: bool,
        liker_id: &str,
    ) -> Result<StockRecord> {
        let symbol = normalize(symbol);
        let mut records = self.records.lock().await;

        let likers = records.entry(symbol.clone()).or_default();
        if register_liker && likers.insert(liker_id.to_string()) {
            debug!(%symbol, likes = likers.len(), "registered liker");
        }

        Ok(StockRecord {
            symbol,
            likers: likers.clone(),
        })
    }
}
