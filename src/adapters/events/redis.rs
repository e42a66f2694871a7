//! Redis pub/sub event publisher.

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::ports::{EventPublisher, Report};

/// Publishes reports as JSON onto a Redis channel.
///
/// Delivery is best-effort: subscribers that are not listening at publish
/// time never see the report, which matches the at-most-once contract.
pub struct RedisEventPublisher {
    client: redis::Client,
    channel: String,
}

impl RedisEventPublisher {
    pub fn new(url: &str, channel: impl Into<String>) -> Result<Self, redis::RedisError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            channel: channel.into(),
        })
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, report: Report) -> Result<(), String> {
        let body = serde_json::to_string(&report).map_err(|e| e.to_string())?;

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| e.to_string())?;
        conn.publish::<_, _, ()>(&self.channel, body)
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}
