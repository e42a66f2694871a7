//! In-memory implementation of FavoritesRepository.

use std::sync::Arc;

use async_trait::async_trait;

use super::store::{FavoriteRow, InMemoryStore};
use crate::domain::foundation::{TrainingId, UserId};
use crate::domain::training::{Training, TrainingError};
use crate::ports::{FavoritesRepository, Page};

/// In-memory FavoritesRepository over a shared store.
#[derive(Clone)]
pub struct InMemoryFavoritesRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryFavoritesRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryFavoritesRepository {
    async fn list(
        &self,
        user: Option<UserId>,
        page: Page,
    ) -> Result<Vec<Training>, TrainingError> {
        let inner = self.store.inner.lock().unwrap();
        let trainings = inner
            .favorites
            .iter()
            .filter(|f| user.map_or(true, |u| f.user == u))
            .filter_map(|f| inner.find_training(f.training))
            .map(|row| inner.to_training(row))
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(trainings)
    }

    async fn favorite(&self, user: UserId, training: TrainingId) -> Result<(), TrainingError> {
        let mut inner = self.store.inner.lock().unwrap();

        if inner.find_training(training).is_none() {
            return Err(TrainingError::NotFound(training));
        }

        // Mirrors the unique (user_id, training_id) index: idempotent insert.
        let exists = inner
            .favorites
            .iter()
            .any(|f| f.user == user && f.training == training);
        if !exists {
            inner.favorites.push(FavoriteRow { user, training });
        }

        Ok(())
    }

    async fn unfavorite(&self, user: UserId, training: TrainingId) -> Result<(), TrainingError> {
        let mut inner = self.store.inner.lock().unwrap();

        let pos = inner
            .favorites
            .iter()
            .position(|f| f.user == user && f.training == training)
            .ok_or(TrainingError::FavoriteNotFound { training, user })?;
        inner.favorites.remove(pos);

        Ok(())
    }
}
