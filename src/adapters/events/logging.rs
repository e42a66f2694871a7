//! Logging event publisher.

use async_trait::async_trait;

use crate::ports::{EventPublisher, Report};

/// Fallback publisher that records reports in the service log.
///
/// Used when no event transport is configured, so lifecycle reports remain
/// observable in development and small deployments.
#[derive(Debug, Default, Clone)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, report: Report) -> Result<(), String> {
        let body = serde_json::to_string(&report).map_err(|e| e.to_string())?;
        tracing::info!(target: "trainings_service::reports", report = %body, "lifecycle report");
        Ok(())
    }
}
