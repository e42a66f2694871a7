//! Event publisher port and report payloads.
//!
//! Lifecycle events are pushed to an external metrics pipeline as flat JSON
//! reports. Delivery is at-most-once best-effort: callers log failures and
//! move on; a publish error must never roll back or fail the repository
//! operation that preceded it.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, TrainingId, UserId};
use crate::domain::training::Training;

/// Service name stamped on every outgoing report.
pub const REPORT_SERVICE: &str = "trainings";

/// The lifecycle event a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportCommand {
    #[serde(rename = "trainingCreated")]
    TrainingCreated,
    #[serde(rename = "trainingFavorited")]
    TrainingFavorited,
}

/// A flat event payload for the metrics pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Deduplication id for the transport.
    pub id: Uuid,
    pub service: &'static str,
    pub command: ReportCommand,
    pub timestamp: Timestamp,
    pub attrs: Map<String, Value>,
}

impl Report {
    fn new(command: ReportCommand, attrs: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            service: REPORT_SERVICE,
            command,
            timestamp: Timestamp::now(),
            attrs,
        }
    }

    /// Report for a freshly created training.
    pub fn training_created(training: &Training) -> Self {
        let mut attrs = Map::new();
        attrs.insert("id".into(), training.id().as_i64().into());
        attrs.insert("title".into(), training.title().into());
        attrs.insert("type".into(), training.kind().as_str().into());
        attrs.insert("difficulty".into(), i64::from(training.difficulty()).into());
        attrs.insert("author".into(), training.author().as_i64().into());
        Self::new(ReportCommand::TrainingCreated, attrs)
    }

    /// Report for a training being favorited.
    pub fn training_favorited(user: UserId, training: TrainingId) -> Self {
        let mut attrs = Map::new();
        attrs.insert("user_id".into(), user.as_i64().into());
        attrs.insert("training_id".into(), training.as_i64().into());
        Self::new(ReportCommand::TrainingFavorited, attrs)
    }
}

/// Port for publishing lifecycle reports.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Attempts to deliver one report.
    ///
    /// Returns an error only so callers can log it; delivery is not retried.
    async fn publish(&self, report: Report) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::training::{NewTraining, TrainingType};

    #[test]
    fn event_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn EventPublisher) {}
    }

    #[test]
    fn created_report_carries_training_attrs() {
        let draft =
            NewTraining::new("5k run", "", TrainingType::Running, 3, vec![], vec![]).unwrap();
        let training = Training::create(TrainingId::new(9), UserId::new(4), draft);
        let report = Report::training_created(&training);

        assert_eq!(report.service, "trainings");
        assert_eq!(report.command, ReportCommand::TrainingCreated);
        assert_eq!(report.attrs["id"], 9);
        assert_eq!(report.attrs["author"], 4);
        assert_eq!(report.attrs["title"], "5k run");
    }

    #[test]
    fn favorited_report_serializes_command_name() {
        let report = Report::training_favorited(UserId::new(7), TrainingId::new(2));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["command"], "trainingFavorited");
        assert_eq!(json["attrs"]["user_id"], 7);
        assert_eq!(json["attrs"]["training_id"], 2);
    }
}
