//! Training repository port.
//!
//! The contract for persisting trainings and their score rows. All
//! read-check-write sequences (create, patch, score upsert) run inside one
//! transaction per call, so a failure partway leaves no partial mutation
//! visible.

use async_trait::async_trait;

use crate::domain::foundation::{TrainingId, UserId};
use crate::domain::training::{
    NewTraining, ScoreValue, Training, TrainingError, TrainingPatch, TrainingType, MAX_DIFFICULTY,
};

/// Pagination window applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    /// Server-side cap on page size, regardless of what the caller asks for.
    pub const MAX_LIMIT: u32 = 100;

    /// Builds a page, clamping the limit into `1..=MAX_LIMIT`.
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::MAX_LIMIT,
        }
    }
}

/// Conjunctive listing predicates.
///
/// `blocked` is a first-class tri-state: `None` applies no blocked predicate
/// at all, which is distinct from filtering for `blocked == false`. The
/// unblocked-only default for ordinary listings is handler policy, not part
/// of this contract. Difficulty is a half-open interval `[min, max)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingFilter {
    pub author: Option<UserId>,
    pub kind: Option<TrainingType>,
    /// Minimum difficulty, inclusive.
    pub min_difficulty: u8,
    /// Maximum difficulty, exclusive.
    pub max_difficulty: u8,
    pub blocked: Option<bool>,
}

impl Default for TrainingFilter {
    fn default() -> Self {
        Self {
            author: None,
            kind: None,
            min_difficulty: 0,
            max_difficulty: MAX_DIFFICULTY + 1,
            blocked: None,
        }
    }
}

impl TrainingFilter {
    /// Whether a training satisfies every supplied predicate.
    pub fn matches(&self, training: &Training) -> bool {
        if let Some(author) = self.author {
            if training.author() != author {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if training.kind() != kind {
                return false;
            }
        }
        if let Some(blocked) = self.blocked {
            if training.is_blocked() != blocked {
                return false;
            }
        }
        training.difficulty() >= self.min_difficulty && training.difficulty() < self.max_difficulty
    }
}

/// Repository port for training lifecycle, queries, and scores.
#[async_trait]
pub trait TrainingRepository: Send + Sync {
    /// Lists trainings matching the filter, in stable id order.
    ///
    /// An empty result is not an error.
    async fn list(&self, filter: &TrainingFilter, page: Page)
        -> Result<Vec<Training>, TrainingError>;

    /// Counts trainings matching the filter, ignoring pagination.
    async fn count(&self, filter: &TrainingFilter) -> Result<u64, TrainingError>;

    /// Fetches a training by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no training has that id
    async fn get_by_id(&self, id: TrainingId) -> Result<Training, TrainingError>;

    /// Persists a new training authored by `author`.
    ///
    /// The returned training is immediately visible to subsequent reads.
    ///
    /// # Errors
    ///
    /// - `DuplicateTitle` when the title is already taken; the store's
    ///   unique index is the source of truth, closing the create/create race
    async fn create(&self, author: UserId, draft: NewTraining)
        -> Result<Training, TrainingError>;

    /// Applies a partial update on behalf of `author`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no training has that id
    /// - `NotAuthor` when `author` does not own the training (checked after
    ///   load, before any mutation)
    /// - `DuplicateTitle` when a changed title collides
    async fn patch(
        &self,
        author: UserId,
        id: TrainingId,
        patch: TrainingPatch,
    ) -> Result<Training, TrainingError>;

    /// Unconditionally sets the moderation flag.
    ///
    /// Admin gating is enforced at the caller boundary, not here.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no training has that id
    async fn set_blocked(&self, id: TrainingId, blocked: bool)
        -> Result<Training, TrainingError>;

    /// Fetches the caller's score row for a training.
    ///
    /// # Errors
    ///
    /// - `ScoreNotFound` when the user has not scored the training; "no
    ///   score yet" is a hard error, not a zero value
    async fn get_score(&self, training: TrainingId, user: UserId)
        -> Result<ScoreValue, TrainingError>;

    /// Inserts or overwrites the user's score row for a training.
    ///
    /// At most one score row exists per (training, user); resubmission
    /// overwrites in place with no history retained.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no training has that id
    async fn add_score(
        &self,
        training: TrainingId,
        user: UserId,
        score: ScoreValue,
    ) -> Result<ScoreValue, TrainingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TrainingRepository) {}
    }

    #[test]
    fn page_clamps_limit() {
        assert_eq!(Page::new(0, 0).limit, 1);
        assert_eq!(Page::new(0, 1000).limit, Page::MAX_LIMIT);
        assert_eq!(Page::new(5, 20), Page { offset: 5, limit: 20 });
    }

    #[test]
    fn default_filter_is_unrestricted() {
        let filter = TrainingFilter::default();
        assert_eq!(filter.author, None);
        assert_eq!(filter.kind, None);
        assert_eq!(filter.blocked, None);
        assert_eq!(filter.min_difficulty, 0);
        assert_eq!(filter.max_difficulty, 11);
    }

    mod matching {
        use super::*;
        use crate::domain::training::NewTraining;

        fn training(difficulty: i64, blocked: bool) -> Training {
            let draft = NewTraining::new(
                format!("training {}", difficulty),
                "",
                TrainingType::Running,
                difficulty,
                vec![],
                vec![],
            )
            .unwrap();
            let mut t = Training::create(TrainingId::new(1), UserId::new(1), draft);
            t.set_blocked(blocked);
            t
        }

        #[test]
        fn difficulty_interval_is_half_open() {
            let filter = TrainingFilter {
                min_difficulty: 5,
                max_difficulty: 6,
                ..Default::default()
            };
            assert!(filter.matches(&training(5, false)));
            assert!(!filter.matches(&training(4, false)));
            assert!(!filter.matches(&training(6, false)));
        }

        #[test]
        fn no_blocked_filter_matches_both_states() {
            let filter = TrainingFilter::default();
            assert!(filter.matches(&training(3, true)));
            assert!(filter.matches(&training(3, false)));
        }

        #[test]
        fn blocked_filter_is_exact() {
            let filter = TrainingFilter {
                blocked: Some(true),
                ..Default::default()
            };
            assert!(filter.matches(&training(3, true)));
            assert!(!filter.matches(&training(3, false)));
        }

        #[test]
        fn author_filter_is_exact() {
            let filter = TrainingFilter {
                author: Some(UserId::new(2)),
                ..Default::default()
            };
            assert!(!filter.matches(&training(3, false)));
        }
    }
}
