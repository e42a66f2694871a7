//! In-memory event publisher for tests.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::ports::{EventPublisher, Report, ReportCommand};

/// Captures published reports for test assertions.
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    published: RwLock<Vec<Report>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports published so far.
    pub fn published(&self) -> Vec<Report> {
        self.published.read().unwrap().clone()
    }

    /// Reports with the given command.
    pub fn published_with(&self, command: ReportCommand) -> Vec<Report> {
        self.published()
            .into_iter()
            .filter(|r| r.command == command)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, report: Report) -> Result<(), String> {
        self.published.write().unwrap().push(report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{TrainingId, UserId};

    #[tokio::test]
    async fn captures_reports_in_order() {
        let publisher = InMemoryEventPublisher::new();
        publisher
            .publish(Report::training_favorited(UserId::new(1), TrainingId::new(2)))
            .await
            .unwrap();
        publisher
            .publish(Report::training_favorited(UserId::new(3), TrainingId::new(4)))
            .await
            .unwrap();

        let reports = publisher.published_with(ReportCommand::TrainingFavorited);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].attrs["user_id"], 1);
        assert_eq!(reports[1].attrs["training_id"], 4);
    }
}
