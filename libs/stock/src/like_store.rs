use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRecord {
    pub symbol: String,
    pub likers: HashSet<String>,
}

impl StockRecord {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            likers: HashSet::new(),
        }
    }

    /// Number of distinct likers
    pub fn likes(&self) -> usize {
        self.likers.len()
    }
}

/// Persistent per-symbol set of liker identifiers.
///
/// Implementations normalize the symbol with [`normalize`] before using it as
/// a key, so callers may pass raw user input.
#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Exact-match lookup
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<StockRecord>>;

    /// Persist a record for `symbol`, seeded with `liker_id` when `register_liker` is set.
    async fn create(
        &self,
        symbol: &str,
        register_liker: bool,
        liker_id: &str,
    ) -> Result<StockRecord>;

    /// Find-or-create, adding `liker_id` when `register_liker` is set and it is not
    /// already present. Runs as a single atomic step per backend.
    async fn upsert(
        &self,
        symbol: &str,
        register_liker: bool,
        liker_id: &str,
    ) -> Result<StockRecord>;

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

pub fn normalize(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
