//! Event publishing configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Event publishing configuration
///
/// When no Redis URL is configured, lifecycle reports fall back to the
/// service log instead of a pub/sub channel.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// Redis connection URL for the report channel
    pub redis_url: Option<String>,

    /// Channel name reports are published on
    #[serde(default = "default_channel")]
    pub channel: String,
}

impl EventsConfig {
    /// Validate event publishing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.redis_url {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        if self.channel.is_empty() {
            return Err(ValidationError::MissingRequired("EVENTS_CHANNEL"));
        }
        Ok(())
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            channel: default_channel(),
        }
    }
}

fn default_channel() -> String {
    "reports".to_string()
}
