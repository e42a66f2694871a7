//! PostgreSQL implementation of FavoritesRepository.
//!
//! The unique (user_id, training_id) index makes favoriting idempotent:
//! a duplicate insert is absorbed by `ON CONFLICT DO NOTHING`.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use super::training_repository::{load_collections, row_to_training, storage_err};
use crate::domain::foundation::{TrainingId, UserId};
use crate::domain::training::{Training, TrainingError};
use crate::ports::{FavoritesRepository, Page};

/// PostgreSQL implementation of FavoritesRepository.
#[derive(Clone)]
pub struct PostgresFavoritesRepository {
    pool: PgPool,
}

impl PostgresFavoritesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoritesRepository for PostgresFavoritesRepository {
    async fn list(
        &self,
        user: Option<UserId>,
        page: Page,
    ) -> Result<Vec<Training>, TrainingError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT t.id, t.author, t.title, t.description, t.type, t.difficulty, \
             t.blocked, t.created_at, \
             COALESCE(SUM(s.score), 0)::BIGINT AS score_total, \
             COUNT(s.id) AS score_amount \
             FROM favorites f \
             JOIN trainings t ON t.id = f.training_id \
             LEFT JOIN training_scores s ON s.training_id = t.id ",
        );
        if let Some(user) = user {
            qb.push("WHERE f.user_id = ");
            qb.push_bind(user.as_i64());
        }
        qb.push(" GROUP BY t.id, f.id ORDER BY f.id OFFSET ");
        qb.push_bind(i64::from(page.offset));
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(page.limit));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        // A training favorited by several users repeats across rows; the
        // collection map keys by training id, so each row resolves the same
        // entry.
        let ids: Vec<i64> = rows
            .iter()
            .map(|r| r.try_get::<i64, _>("id"))
            .collect::<Result<_, _>>()
            .map_err(storage_err)?;
        let mut conn = self.pool.acquire().await.map_err(storage_err)?;
        let collections = load_collections(&mut conn, &ids).await?;

        rows.iter()
            .map(|row| row_to_training(row, &collections))
            .collect()
    }

    async fn favorite(&self, user: UserId, training: TrainingId) -> Result<(), TrainingError> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM trainings WHERE id = $1")
            .bind(training.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage_err)?;
        if exists.is_none() {
            return Err(TrainingError::NotFound(training));
        }

        sqlx::query(
            "INSERT INTO favorites (user_id, training_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, training_id) DO NOTHING",
        )
        .bind(user.as_i64())
        .bind(training.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?;

        tx.commit().await.map_err(storage_err)?;

        Ok(())
    }

    async fn unfavorite(&self, user: UserId, training: TrainingId) -> Result<(), TrainingError> {
        let result =
            sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND training_id = $2")
                .bind(user.as_i64())
                .bind(training.as_i64())
                .execute(&self.pool)
                .await
                .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(TrainingError::FavoriteNotFound { training, user });
        }

        Ok(())
    }
}
