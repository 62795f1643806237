//! Redis-backed implementation of the `ContentCache` capability.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};

use crate::application::repos::{CacheError, ContentCache};

/// Multiplexed Redis connection shared by all requests. The manager
/// reconnects on its own; callers see individual command failures.
#[derive(Clone)]
pub struct RedisContentCache {
    connection: ConnectionManager,
}

impl RedisContentCache {
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    pub async fn health_check(&self) -> Result<(), redis::RedisError> {
        let mut connection = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut connection).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentCache for RedisContentCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.get(key).await.map_err(CacheError::backend)?;
        Ok(value)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        let _: () = connection
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(CacheError::backend)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        let _: () = connection.del(key).await.map_err(CacheError::backend)?;
        Ok(())
    }
}
