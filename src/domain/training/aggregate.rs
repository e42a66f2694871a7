//! Training aggregate.

use super::score::mean_score;
use super::{Goal, MediaUrl, NewTraining, TrainingPatch, TrainingType};
use crate::domain::foundation::{Timestamp, TrainingId, UserId};

/// A workout plan with moderation state and a derived aggregate score.
///
/// Constructed through [`Training::create`] for new plans (the id is assigned
/// by the store) or [`Training::reconstitute`] when loading persisted rows.
/// The aggregate score is always derived from the underlying score rows;
/// there is no persisted running average to drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Training {
    id: TrainingId,
    author: UserId,
    title: String,
    description: String,
    kind: TrainingType,
    difficulty: u8,
    multimedia: Vec<MediaUrl>,
    goals: Vec<Goal>,
    blocked: bool,
    created_at: Timestamp,
    score_total: i64,
    score_amount: u32,
}

impl Training {
    /// Builds a freshly created training from a validated draft.
    ///
    /// New trainings start unblocked with no scores.
    pub fn create(id: TrainingId, author: UserId, draft: NewTraining) -> Self {
        Self {
            id,
            author,
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            difficulty: draft.difficulty,
            multimedia: draft.multimedia,
            goals: draft.goals,
            blocked: false,
            created_at: Timestamp::now(),
            score_total: 0,
            score_amount: 0,
        }
    }

    /// Rebuilds a training from persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TrainingId,
        author: UserId,
        title: String,
        description: String,
        kind: TrainingType,
        difficulty: u8,
        multimedia: Vec<MediaUrl>,
        goals: Vec<Goal>,
        blocked: bool,
        created_at: Timestamp,
        score_total: i64,
        score_amount: u32,
    ) -> Self {
        Self {
            id,
            author,
            title,
            description,
            kind,
            difficulty,
            multimedia,
            goals,
            blocked,
            created_at,
            score_total,
            score_amount,
        }
    }

    pub fn id(&self) -> TrainingId {
        self.id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> TrainingType {
        self.kind
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn multimedia(&self) -> &[MediaUrl] {
        &self.multimedia
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Arithmetic mean of all score rows, 0.0 when unscored.
    pub fn score(&self) -> f64 {
        mean_score(self.score_total, self.score_amount)
    }

    /// Number of score rows backing the aggregate score.
    pub fn score_amount(&self) -> u32 {
        self.score_amount
    }

    /// Sum of the raw (scaled) score integers.
    pub fn score_total(&self) -> i64 {
        self.score_total
    }

    pub fn is_author(&self, user: UserId) -> bool {
        self.author == user
    }

    /// Sets the moderation flag. Authorization lives at the caller boundary.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Applies a partial update. Absent fields keep their prior values;
    /// present multimedia/goal collections replace the existing ones.
    pub fn apply_patch(&mut self, patch: TrainingPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(multimedia) = patch.multimedia {
            self.multimedia = multimedia;
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
    }
}
