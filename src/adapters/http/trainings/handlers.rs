//! Request handlers for the trainings routes.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::domain::foundation::TrainingId;
use crate::domain::training::ScoreValue;
use crate::ports::{EventPublisher, Report, TrainingRepository};

use super::dto::{
    BlockStatusRequest, CreateTrainingRequest, ListTrainingsQuery, ScoreBody,
    TrainingCountResponse, TrainingResponse, UpdateTrainingRequest,
};

/// Shared state for the trainings routes.
#[derive(Clone)]
pub struct TrainingsState {
    pub repository: Arc<dyn TrainingRepository>,
    pub events: Arc<dyn EventPublisher>,
}

/// `GET /trainings`
pub async fn list_trainings(
    State(state): State<TrainingsState>,
    RequireAuth(principal): RequireAuth,
    Query(query): Query<ListTrainingsQuery>,
) -> Result<Json<Vec<TrainingResponse>>, ApiError> {
    let filter = query.filter(principal.id)?;
    let trainings = state.repository.list(&filter, query.page()).await?;
    Ok(Json(trainings.iter().map(TrainingResponse::from).collect()))
}

/// `GET /trainings/count`
pub async fn count_trainings(
    State(state): State<TrainingsState>,
    RequireAuth(principal): RequireAuth,
    Query(query): Query<ListTrainingsQuery>,
) -> Result<Json<TrainingCountResponse>, ApiError> {
    let filter = query.filter(principal.id)?;
    let count = state.repository.count(&filter).await?;
    Ok(Json(TrainingCountResponse { count }))
}

/// `GET /trainings/{id}`
pub async fn get_training(
    State(state): State<TrainingsState>,
    RequireAuth(_principal): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<TrainingResponse>, ApiError> {
    let training = state.repository.get_by_id(TrainingId::new(id)).await?;
    Ok(Json(TrainingResponse::from(&training)))
}

/// `POST /trainings`
pub async fn create_training(
    State(state): State<TrainingsState>,
    RequireAuth(principal): RequireAuth,
    Json(body): Json<CreateTrainingRequest>,
) -> Result<(StatusCode, Json<TrainingResponse>), ApiError> {
    let draft = body.into_draft().map_err(|e| ApiError::bad_request(e.to_string()))?;
    let training = state.repository.create(principal.id, draft).await?;

    // Best-effort: a lost report never fails the request.
    if let Err(e) = state.events.publish(Report::training_created(&training)).await {
        tracing::warn!(error = %e, training = %training.id(), "failed to publish creation report");
    }

    Ok((StatusCode::CREATED, Json(TrainingResponse::from(&training))))
}

/// `PATCH /trainings/{id}`
pub async fn update_training(
    State(state): State<TrainingsState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTrainingRequest>,
) -> Result<Json<TrainingResponse>, ApiError> {
    let patch = body.into_patch().map_err(|e| ApiError::bad_request(e.to_string()))?;
    let training = state
        .repository
        .patch(principal.id, TrainingId::new(id), patch)
        .await?;
    Ok(Json(TrainingResponse::from(&training)))
}

/// `PATCH /trainings/{id}/status` (admin only)
pub async fn set_block_status(
    State(state): State<TrainingsState>,
    RequireAdmin(_principal): RequireAdmin,
    Path(id): Path<i64>,
    Json(body): Json<BlockStatusRequest>,
) -> Result<Json<TrainingResponse>, ApiError> {
    let training = state
        .repository
        .set_blocked(TrainingId::new(id), body.blocked)
        .await?;
    Ok(Json(TrainingResponse::from(&training)))
}

/// `GET /trainings/{id}/scores/me`
pub async fn get_my_score(
    State(state): State<TrainingsState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Json<ScoreBody>, ApiError> {
    let score = state
        .repository
        .get_score(TrainingId::new(id), principal.id)
        .await?;
    Ok(Json(ScoreBody { score: score.as_f64() }))
}

/// `POST /trainings/{id}/scores`
pub async fn submit_score(
    State(state): State<TrainingsState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<i64>,
    Json(body): Json<ScoreBody>,
) -> Result<(StatusCode, Json<ScoreBody>), ApiError> {
    let score = ScoreValue::try_from_f64(body.score)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let stored = state
        .repository
        .add_score(TrainingId::new(id), principal.id, score)
        .await?;
    Ok((StatusCode::CREATED, Json(ScoreBody { score: stored.as_f64() })))
}
