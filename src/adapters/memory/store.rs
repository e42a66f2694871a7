//! Shared in-memory state behind the test repositories.

use std::sync::Mutex;

use crate::domain::foundation::{Timestamp, TrainingId, UserId};
use crate::domain::training::{Goal, MediaUrl, Training, TrainingType};

/// A persisted training row, aggregate score excluded (derived on read).
#[derive(Debug, Clone)]
pub(super) struct TrainingRow {
    pub id: TrainingId,
    pub author: UserId,
    pub title: String,
    pub description: String,
    pub kind: TrainingType,
    pub difficulty: u8,
    pub multimedia: Vec<MediaUrl>,
    pub goals: Vec<Goal>,
    pub blocked: bool,
    pub created_at: Timestamp,
}

/// One user's score row, stored scaled like the database does.
#[derive(Debug, Clone, Copy)]
pub(super) struct ScoreRow {
    pub training: TrainingId,
    pub user: UserId,
    pub raw: i64,
}

/// One favorite relation row.
#[derive(Debug, Clone, Copy)]
pub(super) struct FavoriteRow {
    pub user: UserId,
    pub training: TrainingId,
}

#[derive(Debug, Default)]
pub(super) struct Inner {
    pub trainings: Vec<TrainingRow>,
    pub scores: Vec<ScoreRow>,
    pub favorites: Vec<FavoriteRow>,
    pub next_id: i64,
}

/// Mutex-guarded store shared by the in-memory repositories.
///
/// Locks are held only for the duration of one operation, mirroring the
/// one-transaction-per-call contract of the postgres adapters.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(super) inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    pub fn next_training_id(&mut self) -> TrainingId {
        self.next_id += 1;
        TrainingId::new(self.next_id)
    }

    pub fn find_training(&self, id: TrainingId) -> Option<&TrainingRow> {
        self.trainings.iter().find(|t| t.id == id)
    }

    /// Materializes a row into the aggregate, deriving the score fields
    /// from the score rows.
    pub fn to_training(&self, row: &TrainingRow) -> Training {
        let rows = self.scores.iter().filter(|s| s.training == row.id);
        let (total, amount) = rows.fold((0i64, 0u32), |(t, n), s| (t + s.raw, n + 1));

        Training::reconstitute(
            row.id,
            row.author,
            row.title.clone(),
            row.description.clone(),
            row.kind,
            row.difficulty,
            row.multimedia.clone(),
            row.goals.clone(),
            row.blocked,
            row.created_at,
            total,
            amount,
        )
    }
}
