//! PostgreSQL implementation of TrainingRepository.
//!
//! Title uniqueness and the one-score-per-user rule are enforced by unique
//! indexes; a unique violation surfacing from an insert or update is the
//! single source of truth for the Conflict error, so concurrent writers
//! cannot race past an application-level check. Every read-check-write
//! sequence runs inside one transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::collections::HashMap;

use crate::domain::foundation::{Timestamp, TrainingId, UserId};
use crate::domain::training::{
    Goal, MediaUrl, NewTraining, ScoreValue, Training, TrainingError, TrainingPatch, TrainingType,
};
use crate::ports::{Page, TrainingFilter, TrainingRepository};

/// Unique index backing the global title invariant.
const TITLE_INDEX: &str = "ix_trainings_title";

/// PostgreSQL implementation of TrainingRepository.
#[derive(Clone)]
pub struct PostgresTrainingRepository {
    pool: PgPool,
}

impl PostgresTrainingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: TrainingId) -> Result<Option<Training>, TrainingError> {
        let mut conn = self.pool.acquire().await.map_err(storage_err)?;
        load_training(&mut conn, id).await
    }
}

#[async_trait]
impl TrainingRepository for PostgresTrainingRepository {
    async fn list(
        &self,
        filter: &TrainingFilter,
        page: Page,
    ) -> Result<Vec<Training>, TrainingError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT t.id, t.author, t.title, t.description, t.type, t.difficulty, \
             t.blocked, t.created_at, \
             COALESCE(SUM(s.score), 0)::BIGINT AS score_total, \
             COUNT(s.id) AS score_amount \
             FROM trainings t \
             LEFT JOIN training_scores s ON s.training_id = t.id ",
        );
        push_predicates(&mut qb, filter);
        qb.push(" GROUP BY t.id ORDER BY t.id OFFSET ");
        qb.push_bind(i64::from(page.offset));
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(page.limit));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

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

    async fn count(&self, filter: &TrainingFilter) -> Result<u64, TrainingError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM trainings t ");
        push_predicates(&mut qb, filter);

        let row = qb
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err)?;
        let count: i64 = row.try_get(0).map_err(storage_err)?;

        Ok(count as u64)
    }

    async fn get_by_id(&self, id: TrainingId) -> Result<Training, TrainingError> {
        self.fetch_by_id(id)
            .await?
            .ok_or(TrainingError::NotFound(id))
    }

    async fn create(
        &self,
        author: UserId,
        draft: NewTraining,
    ) -> Result<Training, TrainingError> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let title = draft.title.clone();
        let row = sqlx::query(
            r#"
            INSERT INTO trainings (author, title, description, type, difficulty, blocked, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, NOW())
            RETURNING id, created_at
            "#,
        )
        .bind(author.as_i64())
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.kind.as_str())
        .bind(i32::from(draft.difficulty))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_title_conflict(e, &title))?;

        let id: i64 = row.try_get("id").map_err(storage_err)?;
        let created_at: chrono::DateTime<chrono::Utc> =
            row.try_get("created_at").map_err(storage_err)?;

        insert_collections(&mut tx, id, &draft.multimedia, &draft.goals).await?;

        tx.commit().await.map_err(storage_err)?;

        Ok(Training::reconstitute(
            TrainingId::new(id),
            author,
            draft.title,
            draft.description,
            draft.kind,
            draft.difficulty,
            draft.multimedia,
            draft.goals,
            false,
            Timestamp::from_datetime(created_at),
            0,
            0,
        ))
    }

    async fn patch(
        &self,
        author: UserId,
        id: TrainingId,
        patch: TrainingPatch,
    ) -> Result<Training, TrainingError> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let row = sqlx::query(
            "SELECT author, title, description, type, difficulty FROM trainings \
             WHERE id = $1 FOR UPDATE",
        )
        .bind(id.as_i64())
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_err)?
        .ok_or(TrainingError::NotFound(id))?;

        let row_author: i64 = row.try_get("author").map_err(storage_err)?;
        if UserId::new(row_author) != author {
            return Err(TrainingError::NotAuthor { training: id, user: author });
        }

        let title: String = row.try_get("title").map_err(storage_err)?;
        let description: String = row.try_get("description").map_err(storage_err)?;
        let kind: String = row.try_get("type").map_err(storage_err)?;
        let difficulty: i32 = row.try_get("difficulty").map_err(storage_err)?;

        let new_title = patch.title.clone().unwrap_or(title);
        let new_description = patch.description.unwrap_or(description);
        let new_kind = match patch.kind {
            Some(kind) => kind,
            None => parse_kind(&kind)?,
        };
        let new_difficulty = patch.difficulty.unwrap_or(difficulty as u8);

        sqlx::query(
            "UPDATE trainings SET title = $2, description = $3, type = $4, difficulty = $5 \
             WHERE id = $1",
        )
        .bind(id.as_i64())
        .bind(&new_title)
        .bind(&new_description)
        .bind(new_kind.as_str())
        .bind(i32::from(new_difficulty))
        .execute(&mut *tx)
        .await
        .map_err(|e| map_title_conflict(e, &new_title))?;

        if let Some(multimedia) = &patch.multimedia {
            sqlx::query("DELETE FROM training_multimedia WHERE training_id = $1")
                .bind(id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(storage_err)?;
            insert_multimedia(&mut tx, id.as_i64(), multimedia).await?;
        }
        if let Some(goals) = &patch.goals {
            sqlx::query("DELETE FROM training_goals WHERE training_id = $1")
                .bind(id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(storage_err)?;
            insert_goals(&mut tx, id.as_i64(), goals).await?;
        }

        // Re-read inside the transaction so the returned entity cannot pick
        // up a concurrent writer's changes.
        let training = load_training(&mut tx, id)
            .await?
            .ok_or(TrainingError::NotFound(id))?;

        tx.commit().await.map_err(storage_err)?;

        Ok(training)
    }

    async fn set_blocked(
        &self,
        id: TrainingId,
        blocked: bool,
    ) -> Result<Training, TrainingError> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let result = sqlx::query("UPDATE trainings SET blocked = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(blocked)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(TrainingError::NotFound(id));
        }

        let training = load_training(&mut tx, id)
            .await?
            .ok_or(TrainingError::NotFound(id))?;

        tx.commit().await.map_err(storage_err)?;

        Ok(training)
    }

    async fn get_score(
        &self,
        training: TrainingId,
        user: UserId,
    ) -> Result<ScoreValue, TrainingError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT score FROM training_scores WHERE training_id = $1 AND author = $2",
        )
        .bind(training.as_i64())
        .bind(user.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        row.map(|(raw,)| ScoreValue::from_raw(raw))
            .ok_or(TrainingError::ScoreNotFound { training, user })
    }

    async fn add_score(
        &self,
        training: TrainingId,
        user: UserId,
        score: ScoreValue,
    ) -> Result<ScoreValue, TrainingError> {
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
            r#"
            INSERT INTO training_scores (training_id, author, score)
            VALUES ($1, $2, $3)
            ON CONFLICT (training_id, author) DO UPDATE SET score = EXCLUDED.score
            "#,
        )
        .bind(training.as_i64())
        .bind(user.as_i64())
        .bind(score.raw())
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?;

        tx.commit().await.map_err(storage_err)?;

        Ok(score)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

pub(super) fn storage_err(e: impl std::fmt::Display) -> TrainingError {
    TrainingError::storage(e.to_string())
}

fn map_title_conflict(e: sqlx::Error, title: &str) -> TrainingError {
    if let sqlx::Error::Database(db) = &e {
        let on_title_index = db.constraint().map_or(true, |c| c == TITLE_INDEX);
        if db.code().as_deref() == Some("23505") && on_title_index {
            return TrainingError::DuplicateTitle {
                title: title.to_string(),
            };
        }
    }
    storage_err(e)
}

pub(super) fn parse_kind(s: &str) -> Result<TrainingType, TrainingError> {
    s.parse::<TrainingType>().map_err(TrainingError::Storage)
}

fn push_predicates(qb: &mut QueryBuilder<'_, Postgres>, filter: &TrainingFilter) {
    qb.push("WHERE t.difficulty >= ");
    qb.push_bind(i32::from(filter.min_difficulty));
    qb.push(" AND t.difficulty < ");
    qb.push_bind(i32::from(filter.max_difficulty));
    if let Some(author) = filter.author {
        qb.push(" AND t.author = ");
        qb.push_bind(author.as_i64());
    }
    if let Some(kind) = filter.kind {
        qb.push(" AND t.type = ");
        qb.push_bind(kind.as_str());
    }
    if let Some(blocked) = filter.blocked {
        qb.push(" AND t.blocked = ");
        qb.push_bind(blocked);
    }
}

type Collections = HashMap<i64, (Vec<MediaUrl>, Vec<Goal>)>;

/// Loads one training with its aggregate score and collections on the given
/// connection, so a caller holding a transaction sees its own writes.
async fn load_training(
    conn: &mut sqlx::PgConnection,
    id: TrainingId,
) -> Result<Option<Training>, TrainingError> {
    let row = sqlx::query(
        r#"
        SELECT t.id, t.author, t.title, t.description, t.type, t.difficulty,
               t.blocked, t.created_at,
               COALESCE(SUM(s.score), 0)::BIGINT AS score_total,
               COUNT(s.id) AS score_amount
        FROM trainings t
        LEFT JOIN training_scores s ON s.training_id = t.id
        WHERE t.id = $1
        GROUP BY t.id
        "#,
    )
    .bind(id.as_i64())
    .fetch_optional(&mut *conn)
    .await
    .map_err(storage_err)?;

    match row {
        Some(row) => {
            let collections = load_collections(&mut *conn, &[id.as_i64()]).await?;
            Ok(Some(row_to_training(&row, &collections)?))
        }
        None => Ok(None),
    }
}

/// Loads the multimedia and goal collections for a batch of trainings,
/// preserving row insertion order within each training.
pub(super) async fn load_collections(
    conn: &mut sqlx::PgConnection,
    ids: &[i64],
) -> Result<Collections, TrainingError> {
    let mut collections: Collections = ids.iter().map(|id| (*id, Default::default())).collect();
    if ids.is_empty() {
        return Ok(collections);
    }

    let media_rows = sqlx::query(
        "SELECT training_id, url FROM training_multimedia \
         WHERE training_id = ANY($1) ORDER BY id",
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(storage_err)?;
    for row in media_rows {
        let training_id: i64 = row.try_get("training_id").map_err(storage_err)?;
        let url: String = row.try_get("url").map_err(storage_err)?;
        if let Some((media, _)) = collections.get_mut(&training_id) {
            media.push(MediaUrl::new(url)?);
        }
    }

    let goal_rows = sqlx::query(
        "SELECT training_id, name, description FROM training_goals \
         WHERE training_id = ANY($1) ORDER BY id",
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(storage_err)?;
    for row in goal_rows {
        let training_id: i64 = row.try_get("training_id").map_err(storage_err)?;
        let name: String = row.try_get("name").map_err(storage_err)?;
        let description: String = row.try_get("description").map_err(storage_err)?;
        if let Some((_, goals)) = collections.get_mut(&training_id) {
            goals.push(Goal::new(name, description)?);
        }
    }

    Ok(collections)
}

pub(super) fn row_to_training(
    row: &sqlx::postgres::PgRow,
    collections: &Collections,
) -> Result<Training, TrainingError> {
    let id: i64 = row.try_get("id").map_err(storage_err)?;
    let author: i64 = row.try_get("author").map_err(storage_err)?;
    let title: String = row.try_get("title").map_err(storage_err)?;
    let description: String = row.try_get("description").map_err(storage_err)?;
    let kind: String = row.try_get("type").map_err(storage_err)?;
    let difficulty: i32 = row.try_get("difficulty").map_err(storage_err)?;
    let blocked: bool = row.try_get("blocked").map_err(storage_err)?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(storage_err)?;
    let score_total: i64 = row.try_get("score_total").map_err(storage_err)?;
    let score_amount: i64 = row.try_get("score_amount").map_err(storage_err)?;

    // A listing can repeat an id (one row per favorite), so the lookup must
    // not consume the entry.
    let (multimedia, goals) = collections.get(&id).cloned().unwrap_or_default();

    Ok(Training::reconstitute(
        TrainingId::new(id),
        UserId::new(author),
        title,
        description,
        parse_kind(&kind)?,
        difficulty as u8,
        multimedia,
        goals,
        blocked,
        Timestamp::from_datetime(created_at),
        score_total,
        score_amount as u32,
    ))
}

async fn insert_multimedia(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    training_id: i64,
    multimedia: &[MediaUrl],
) -> Result<(), TrainingError> {
    for url in multimedia {
        sqlx::query("INSERT INTO training_multimedia (training_id, url) VALUES ($1, $2)")
            .bind(training_id)
            .bind(url.as_str())
            .execute(&mut **tx)
            .await
            .map_err(storage_err)?;
    }
    Ok(())
}

async fn insert_goals(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    training_id: i64,
    goals: &[Goal],
) -> Result<(), TrainingError> {
    for goal in goals {
        sqlx::query(
            "INSERT INTO training_goals (training_id, name, description) VALUES ($1, $2, $3)",
        )
        .bind(training_id)
        .bind(goal.name())
        .bind(goal.description())
        .execute(&mut **tx)
        .await
        .map_err(storage_err)?;
    }
    Ok(())
}

async fn insert_collections(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    training_id: i64,
    multimedia: &[MediaUrl],
    goals: &[Goal],
) -> Result<(), TrainingError> {
    insert_multimedia(tx, training_id, multimedia).await?;
    insert_goals(tx, training_id, goals).await?;
    Ok(())
}
