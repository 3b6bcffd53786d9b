use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use fred::interfaces::TransactionInterface;
use fred::prelude::*;
use fred::types::Value;
use tracing::{debug, error, info, instrument};

use crate::error::{Result, StockError};
use crate::like_store::{LikeStore, StockRecord, normalize};

/// Redis backed like store.
///
/// Layout:
/// - `{prefix}:symbols` set of every symbol that has a record
/// - `{prefix}:likes:{SYMBOL}` set of liker identifiers for one symbol
#[derive(Clone)]
pub struct RedisLikeStore {
    client: Client,
    key_prefix: String,
}

impl RedisLikeStore {
    pub async fn connect(redis_url: &str, key: impl Into<String>) -> Result<Self> {
        let config = Config::from_url(redis_url)
            .map_err(|e| StockError::Config(format!("invalid redis url: {e}")))?;

        let client = Builder::from_config(config)
            .with_connection_config(|config| {
                config.connection_timeout = Duration::from_secs(5);
                config.tcp = TcpConfig {
                    nodelay: Some(true),
                    ..Default::default()
                };
            })
            .build()?;

        client.on_error(|(error, server)| async move {
            error!(?server, ?error, "redis connection error");
            Ok(())
        });

        client.connect();
        client.wait_for_connect().await?;
        info!("connected to redis");

        Ok(Self {
            client,
            key_prefix: key.into(),
        })
    }

    fn symbols_key(&self) -> String {
        symbols_key(&self.key_prefix)
    }

    fn likes_key(&self, symbol: &str) -> String {
        likes_key(&self.key_prefix, symbol)
    }

    async fn load(&self, symbol: String) -> Result<StockRecord> {
        let likers: HashSet<String> = self.client.smembers(self.likes_key(&symbol)).await?;
        Ok(StockRecord { symbol, likers })
    }
}

fn symbols_key(prefix: &str) -> String {
    format!("{prefix}:symbols")
}

fn likes_key(prefix: &str, symbol: &str) -> String {
    format!("{prefix}:likes:{symbol}")
}

#[async_trait]
impl LikeStore for RedisLikeStore {
    #[instrument(skip(self))]
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<StockRecord>> {
        let symbol = normalize(symbol);
        let known: bool = self.client.sismember(self.symbols_key(), symbol.as_str()).await?;

        if !known {
            return Ok(None);
        }
        self.load(symbol).await.map(Some)
    }

    #[instrument(skip(self, liker_id))]
    async fn create(
        &self,
        symbol: &str,
        register_liker: bool,
        liker_id: &str,
    ) -> Result<StockRecord> {
        let symbol = normalize(symbol);
        let key = self.likes_key(&symbol);

        let trx = self.client.multi();
        let _: Value = trx.del(key.as_str()).await?;
        if register_liker {
            let _: Value = trx.sadd(key.as_str(), liker_id).await?;
        }
        let _: Value = trx.sadd(self.symbols_key(), symbol.as_str()).await?;
        let _: Value = trx.exec(true).await?;

        self.load(symbol).await
    }

    /// SADD both creates the set and adds the member only if absent, so no
    /// read-modify-write window exists between concurrent likers.
    #[instrument(skip(self, liker_id))]
    async fn upsert(
        &self,
        symbol: &str,
        register_liker: bool,
        liker_id: &str,
    ) -> Result<StockRecord> {
        let symbol = normalize(symbol);

        let created: i64 = self.client.sadd(self.symbols_key(), symbol.as_str()).await?;
        if created == 1 {
            debug!("created record");
        }

        if register_liker {
            let added: i64 = self.client.sadd(self.likes_key(&symbol), liker_id).await?;
            debug!(added = added == 1, "registered liker");
        }

        self.load(symbol).await
    }

    async fn close(&self) -> Result<()> {
        self.client.quit().await?;
        info!("redis connection closed");
        Ok(())
    }
}
