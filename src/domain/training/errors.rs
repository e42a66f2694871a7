//! Typed errors for training and favorites operations.

use thiserror::Error;

use crate::domain::foundation::{TrainingId, UserId, ValidationError};

/// Errors surfaced by the training and favorites repositories.
#[derive(Debug, Clone, Error)]
pub enum TrainingError {
    #[error("Training not found: {0}")]
    NotFound(TrainingId),

    #[error("No score by user {user} for training {training}")]
    ScoreNotFound { training: TrainingId, user: UserId },

    #[error("Training {training} is not favorited by user {user}")]
    FavoriteNotFound { training: TrainingId, user: UserId },

    #[error("A training with the title \"{title}\" already exists")]
    DuplicateTitle { title: String },

    #[error("User {user} is not the author of training {training}")]
    NotAuthor { training: TrainingId, user: UserId },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl TrainingError {
    pub fn storage(message: impl Into<String>) -> Self {
        TrainingError::Storage(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_title_names_the_title() {
        let err = TrainingError::DuplicateTitle {
            title: "5k run".into(),
        };
        assert_eq!(
            err.to_string(),
            "A training with the title \"5k run\" already exists"
        );
    }

    #[test]
    fn not_author_names_both_ids() {
        let err = TrainingError::NotAuthor {
            training: TrainingId::new(3),
            user: UserId::new(9),
        };
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn validation_errors_convert() {
        let err: TrainingError = ValidationError::EmptyField { field: "title" }.into();
        assert!(matches!(err, TrainingError::Validation(_)));
    }
}
