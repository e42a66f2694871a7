//! In-memory implementation of TrainingRepository.

use std::sync::Arc;

use async_trait::async_trait;

use super::store::{InMemoryStore, ScoreRow, TrainingRow};
use crate::domain::foundation::{TrainingId, UserId};
use crate::domain::training::{
    NewTraining, ScoreValue, Training, TrainingError, TrainingPatch,
};
use crate::ports::{Page, TrainingFilter, TrainingRepository};

/// In-memory TrainingRepository over a shared store.
#[derive(Clone)]
pub struct InMemoryTrainingRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryTrainingRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TrainingRepository for InMemoryTrainingRepository {
    async fn list(
        &self,
        filter: &TrainingFilter,
        page: Page,
    ) -> Result<Vec<Training>, TrainingError> {
        let inner = self.store.inner.lock().unwrap();
        let trainings = inner
            .trainings
            .iter()
            .map(|row| inner.to_training(row))
            .filter(|t| filter.matches(t))
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(trainings)
    }

    async fn count(&self, filter: &TrainingFilter) -> Result<u64, TrainingError> {
        let inner = self.store.inner.lock().unwrap();
        let count = inner
            .trainings
            .iter()
            .map(|row| inner.to_training(row))
            .filter(|t| filter.matches(t))
            .count();
        Ok(count as u64)
    }

    async fn get_by_id(&self, id: TrainingId) -> Result<Training, TrainingError> {
        let inner = self.store.inner.lock().unwrap();
        inner
            .find_training(id)
            .map(|row| inner.to_training(row))
            .ok_or(TrainingError::NotFound(id))
    }

    async fn create(
        &self,
        author: UserId,
        draft: NewTraining,
    ) -> Result<Training, TrainingError> {
        let mut inner = self.store.inner.lock().unwrap();

        // Mirrors the unique title index.
        if inner.trainings.iter().any(|t| t.title == draft.title) {
            return Err(TrainingError::DuplicateTitle { title: draft.title });
        }

        let id = inner.next_training_id();
        let training = Training::create(id, author, draft);
        inner.trainings.push(TrainingRow {
            id,
            author,
            title: training.title().to_string(),
            description: training.description().to_string(),
            kind: training.kind(),
            difficulty: training.difficulty(),
            multimedia: training.multimedia().to_vec(),
            goals: training.goals().to_vec(),
            blocked: training.is_blocked(),
            created_at: training.created_at(),
        });

        Ok(training)
    }

    async fn patch(
        &self,
        author: UserId,
        id: TrainingId,
        patch: TrainingPatch,
    ) -> Result<Training, TrainingError> {
        let mut inner = self.store.inner.lock().unwrap();

        let row = inner
            .find_training(id)
            .cloned()
            .ok_or(TrainingError::NotFound(id))?;

        if row.author != author {
            return Err(TrainingError::NotAuthor { training: id, user: author });
        }

        if let Some(new_title) = &patch.title {
            if *new_title != row.title
                && inner.trainings.iter().any(|t| t.title == *new_title)
            {
                return Err(TrainingError::DuplicateTitle {
                    title: new_title.clone(),
                });
            }
        }

        let mut training = inner.to_training(&row);
        training.apply_patch(patch);

        let stored = inner
            .trainings
            .iter_mut()
            .find(|t| t.id == id)
            .expect("row disappeared under lock");
        stored.title = training.title().to_string();
        stored.description = training.description().to_string();
        stored.kind = training.kind();
        stored.difficulty = training.difficulty();
        stored.multimedia = training.multimedia().to_vec();
        stored.goals = training.goals().to_vec();

        Ok(training)
    }

    async fn set_blocked(
        &self,
        id: TrainingId,
        blocked: bool,
    ) -> Result<Training, TrainingError> {
        let mut inner = self.store.inner.lock().unwrap();

        let row = inner
            .trainings
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TrainingError::NotFound(id))?;
        row.blocked = blocked;

        let row = row.clone();
        Ok(inner.to_training(&row))
    }

    async fn get_score(
        &self,
        training: TrainingId,
        user: UserId,
    ) -> Result<ScoreValue, TrainingError> {
        let inner = self.store.inner.lock().unwrap();
        inner
            .scores
            .iter()
            .find(|s| s.training == training && s.user == user)
            .map(|s| ScoreValue::from_raw(s.raw))
            .ok_or(TrainingError::ScoreNotFound { training, user })
    }

    async fn add_score(
        &self,
        training: TrainingId,
        user: UserId,
        score: ScoreValue,
    ) -> Result<ScoreValue, TrainingError> {
        let mut inner = self.store.inner.lock().unwrap();

        if inner.find_training(training).is_none() {
            return Err(TrainingError::NotFound(training));
        }

        match inner
            .scores
            .iter_mut()
            .find(|s| s.training == training && s.user == user)
        {
            Some(row) => row.raw = score.raw(),
            None => inner.scores.push(ScoreRow {
                training,
                user,
                raw: score.raw(),
            }),
        }

        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::training::{TrainingType, SCORE_SCALE};

    fn repo() -> InMemoryTrainingRepository {
        InMemoryTrainingRepository::new(Arc::new(InMemoryStore::new()))
    }

    fn draft(title: &str, difficulty: i64) -> NewTraining {
        NewTraining::new(title, "", TrainingType::Running, difficulty, vec![], vec![]).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_roundtrips() {
        let repo = repo();
        let created = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();
        let fetched = repo.get_by_id(created.id()).await.unwrap();

        assert_eq!(fetched.title(), "5k run");
        assert_eq!(fetched.author(), UserId::new(1));
        assert!(!fetched.is_blocked());
        assert_eq!(fetched.score(), 0.0);
        assert_eq!(fetched.score_amount(), 0);
    }

    #[tokio::test]
    async fn duplicate_title_conflicts_and_names_title() {
        let repo = repo();
        repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();
        let err = repo.create(UserId::new(2), draft("5k run", 5)).await.unwrap_err();

        match err {
            TrainingError::DuplicateTitle { title } => assert_eq!(title, "5k run"),
            other => panic!("expected DuplicateTitle, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let err = repo().get_by_id(TrainingId::new(99)).await.unwrap_err();
        assert!(matches!(err, TrainingError::NotFound(_)));
    }

    #[tokio::test]
    async fn patch_by_non_author_is_rejected_before_mutation() {
        let repo = repo();
        let t = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();

        let patch = TrainingPatch {
            difficulty: Some(5),
            ..Default::default()
        };
        let err = repo.patch(UserId::new(2), t.id(), patch).await.unwrap_err();
        assert!(matches!(err, TrainingError::NotAuthor { .. }));

        let unchanged = repo.get_by_id(t.id()).await.unwrap();
        assert_eq!(unchanged.difficulty(), 3);
    }

    #[tokio::test]
    async fn patch_applies_partial_update() {
        let repo = repo();
        let t = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();

        let patch = TrainingPatch {
            difficulty: Some(4),
            ..Default::default()
        };
        let patched = repo.patch(UserId::new(1), t.id(), patch).await.unwrap();
        assert_eq!(patched.difficulty(), 4);
        assert_eq!(patched.title(), "5k run");
    }

    #[tokio::test]
    async fn patch_to_taken_title_conflicts() {
        let repo = repo();
        repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();
        let t = repo.create(UserId::new(1), draft("10k run", 5)).await.unwrap();

        let patch = TrainingPatch {
            title: Some("5k run".into()),
            ..Default::default()
        };
        let err = repo.patch(UserId::new(1), t.id(), patch).await.unwrap_err();
        assert!(matches!(err, TrainingError::DuplicateTitle { .. }));
    }

    #[tokio::test]
    async fn patch_keeping_own_title_is_fine() {
        let repo = repo();
        let t = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();

        let patch = TrainingPatch {
            title: Some("5k run".into()),
            difficulty: Some(7),
            ..Default::default()
        };
        let patched = repo.patch(UserId::new(1), t.id(), patch).await.unwrap();
        assert_eq!(patched.difficulty(), 7);
    }

    #[tokio::test]
    async fn set_blocked_flips_flag() {
        let repo = repo();
        let t = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();

        let blocked = repo.set_blocked(t.id(), true).await.unwrap();
        assert!(blocked.is_blocked());

        let err = repo.set_blocked(TrainingId::new(99), true).await.unwrap_err();
        assert!(matches!(err, TrainingError::NotFound(_)));
    }

    #[tokio::test]
    async fn score_resubmission_overwrites_in_place() {
        let repo = repo();
        let t = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();
        let user = UserId::new(7);

        repo.add_score(t.id(), user, ScoreValue::try_from_f64(4.0).unwrap())
            .await
            .unwrap();
        repo.add_score(t.id(), user, ScoreValue::try_from_f64(2.0).unwrap())
            .await
            .unwrap();

        let score = repo.get_score(t.id(), user).await.unwrap();
        assert_eq!(score.as_f64(), 2.0);

        let training = repo.get_by_id(t.id()).await.unwrap();
        assert_eq!(training.score_amount(), 1);
        assert_eq!(training.score(), 2.0);
    }

    #[tokio::test]
    async fn aggregate_score_is_mean_over_users() {
        let repo = repo();
        let t = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();

        repo.add_score(t.id(), UserId::new(7), ScoreValue::try_from_f64(3.0).unwrap())
            .await
            .unwrap();
        repo.add_score(t.id(), UserId::new(8), ScoreValue::try_from_f64(5.0).unwrap())
            .await
            .unwrap();

        let training = repo.get_by_id(t.id()).await.unwrap();
        assert_eq!(training.score(), 4.0);
        assert_eq!(training.score_amount(), 2);
    }

    #[tokio::test]
    async fn score_roundtrip_within_scale_tolerance() {
        let repo = repo();
        let t = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();

        repo.add_score(t.id(), UserId::new(7), ScoreValue::try_from_f64(3.333).unwrap())
            .await
            .unwrap();
        let got = repo.get_score(t.id(), UserId::new(7)).await.unwrap();
        assert!((got.as_f64() - 3.333).abs() <= 1.0 / SCORE_SCALE as f64);
    }

    #[tokio::test]
    async fn missing_score_is_a_hard_error() {
        let repo = repo();
        let t = repo.create(UserId::new(1), draft("5k run", 3)).await.unwrap();

        let err = repo.get_score(t.id(), UserId::new(7)).await.unwrap_err();
        assert!(matches!(err, TrainingError::ScoreNotFound { .. }));
    }

    #[tokio::test]
    async fn scoring_missing_training_is_not_found() {
        let err = repo()
            .add_score(
                TrainingId::new(99),
                UserId::new(7),
                ScoreValue::try_from_f64(3.0).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TrainingError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_filters_difficulty_half_open() {
        let repo = repo();
        repo.create(UserId::new(1), draft("training a", 4)).await.unwrap();
        repo.create(UserId::new(1), draft("training b", 5)).await.unwrap();
        repo.create(UserId::new(1), draft("training c", 6)).await.unwrap();

        let filter = TrainingFilter {
            min_difficulty: 5,
            max_difficulty: 6,
            ..Default::default()
        };
        let found = repo.list(&filter, Page::default()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].difficulty(), 5);
    }

    #[tokio::test]
    async fn list_blocked_tristate() {
        let repo = repo();
        let a = repo.create(UserId::new(1), draft("training a", 3)).await.unwrap();
        repo.create(UserId::new(1), draft("training b", 3)).await.unwrap();
        repo.set_blocked(a.id(), true).await.unwrap();

        let unrestricted = repo.list(&TrainingFilter::default(), Page::default()).await.unwrap();
        assert_eq!(unrestricted.len(), 2);

        let unblocked_only = TrainingFilter {
            blocked: Some(false),
            ..Default::default()
        };
        let found = repo.list(&unblocked_only, Page::default()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title(), "training b");

        let blocked_only = TrainingFilter {
            blocked: Some(true),
            ..Default::default()
        };
        let found = repo.list(&blocked_only, Page::default()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title(), "training a");
    }

    #[tokio::test]
    async fn list_paginates_after_filtering() {
        let repo = repo();
        for i in 0..5 {
            repo.create(UserId::new(1), draft(&format!("training {}", i), 3))
                .await
                .unwrap();
        }

        let page = repo
            .list(&TrainingFilter::default(), Page::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].title(), "training 2");
        assert_eq!(page[1].title(), "training 3");
    }

    #[tokio::test]
    async fn count_ignores_pagination() {
        let repo = repo();
        for i in 0..5 {
            repo.create(UserId::new(1), draft(&format!("training {}", i), 3))
                .await
                .unwrap();
        }
        assert_eq!(repo.count(&TrainingFilter::default()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn list_with_no_matches_is_empty_not_error() {
        let found = repo()
            .list(&TrainingFilter::default(), Page::default())
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
