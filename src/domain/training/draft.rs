//! Validated creation and patch inputs for trainings.

use std::collections::HashSet;

use super::{
    Goal, MediaUrl, TrainingType, DESCRIPTION_MAX, MAX_DIFFICULTY, MAX_GOALS, MAX_MULTIMEDIA,
    TITLE_MAX, TITLE_MIN,
};
use crate::domain::foundation::ValidationError;

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
        return Err(ValidationError::length_out_of_range(
            "title", TITLE_MIN, TITLE_MAX, len,
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if len > DESCRIPTION_MAX {
        return Err(ValidationError::length_out_of_range(
            "description",
            0,
            DESCRIPTION_MAX,
            len,
        ));
    }
    Ok(())
}

fn validate_difficulty(difficulty: i64) -> Result<u8, ValidationError> {
    if !(i64::from(super::MIN_DIFFICULTY)..=i64::from(MAX_DIFFICULTY)).contains(&difficulty) {
        return Err(ValidationError::out_of_range(
            "difficulty",
            i64::from(super::MIN_DIFFICULTY),
            i64::from(MAX_DIFFICULTY),
            difficulty,
        ));
    }
    Ok(difficulty as u8)
}

fn validate_multimedia(multimedia: &[MediaUrl]) -> Result<(), ValidationError> {
    if multimedia.len() > MAX_MULTIMEDIA {
        return Err(ValidationError::too_many_items(
            "multimedia",
            MAX_MULTIMEDIA,
            multimedia.len(),
        ));
    }
    Ok(())
}

fn validate_goals(goals: &[Goal]) -> Result<(), ValidationError> {
    if goals.len() > MAX_GOALS {
        return Err(ValidationError::too_many_items("goals", MAX_GOALS, goals.len()));
    }
    let mut seen = HashSet::new();
    for goal in goals {
        if !seen.insert(goal.name()) {
            return Err(ValidationError::DuplicateItem {
                field: "goals",
                value: goal.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Validated input for creating a training.
///
/// The author id is not part of the draft; it comes from the caller context,
/// never from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTraining {
    pub title: String,
    pub description: String,
    pub kind: TrainingType,
    pub difficulty: u8,
    pub multimedia: Vec<MediaUrl>,
    pub goals: Vec<Goal>,
}

impl NewTraining {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        kind: TrainingType,
        difficulty: i64,
        multimedia: Vec<MediaUrl>,
        goals: Vec<Goal>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let description = description.into();

        validate_title(&title)?;
        validate_description(&description)?;
        let difficulty = validate_difficulty(difficulty)?;
        validate_multimedia(&multimedia)?;
        validate_goals(&goals)?;

        Ok(Self {
            title,
            description,
            kind,
            difficulty,
            multimedia,
            goals,
        })
    }
}

/// Partial update for a training.
///
/// Each field carries explicit presence: `None` means "leave unchanged",
/// `Some(value)` means "set to value" even when the value is zero or empty.
/// Supplied multimedia/goal collections replace the prior ones entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<TrainingType>,
    pub difficulty: Option<u8>,
    pub multimedia: Option<Vec<MediaUrl>>,
    pub goals: Option<Vec<Goal>>,
}

impl TrainingPatch {
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        kind: Option<TrainingType>,
        difficulty: Option<i64>,
        multimedia: Option<Vec<MediaUrl>>,
        goals: Option<Vec<Goal>>,
    ) -> Result<Self, ValidationError> {
        if let Some(title) = &title {
            validate_title(title)?;
        }
        if let Some(description) = &description {
            validate_description(description)?;
        }
        let difficulty = difficulty.map(validate_difficulty).transpose()?;
        if let Some(multimedia) = &multimedia {
            validate_multimedia(multimedia)?;
        }
        if let Some(goals) = &goals {
            validate_goals(goals)?;
        }

        Ok(Self {
            title,
            description,
            kind,
            difficulty,
            multimedia,
            goals,
        })
    }

    /// True when no field is present; applying it is a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.difficulty.is_none()
            && self.multimedia.is_none()
            && self.goals.is_none()
    }
}
