//! Favorites repository port.
//!
//! Maintains the (user, training) bookmark relation. Write access to
//! favorite rows lives here exclusively; trainings are only read, to check
//! existence.

use async_trait::async_trait;

use super::Page;
use crate::domain::foundation::{TrainingId, UserId};
use crate::domain::training::{Training, TrainingError};

/// Repository port for the favorites relation.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Lists the trainings favorited by `user`, as full entities, in
    /// favorite insertion order.
    ///
    /// `user = None` lists favorites across all users (administrative use)
    /// under the same pagination contract.
    async fn list(&self, user: Option<UserId>, page: Page)
        -> Result<Vec<Training>, TrainingError>;

    /// Adds a training to the user's favorites.
    ///
    /// Favoriting an already-favorited training is an idempotent no-op.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the training does not exist
    async fn favorite(&self, user: UserId, training: TrainingId) -> Result<(), TrainingError>;

    /// Removes a training from the user's favorites.
    ///
    /// # Errors
    ///
    /// - `FavoriteNotFound` when no matching favorite row exists
    async fn unfavorite(&self, user: UserId, training: TrainingId) -> Result<(), TrainingError>;
}
