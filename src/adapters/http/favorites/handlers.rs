//! Request handlers for the favorites routes.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::trainings::TrainingResponse;
use crate::domain::foundation::{Principal, TrainingId, UserId};
use crate::ports::{EventPublisher, FavoritesRepository, Report};

use super::dto::{FavoriteRequest, ListFavoritesQuery};

/// Shared state for the favorites routes.
#[derive(Clone)]
pub struct FavoritesState {
    pub repository: Arc<dyn FavoritesRepository>,
    pub events: Arc<dyn EventPublisher>,
}

/// Resolves the `user` query parameter into a listing scope.
///
/// Ordinary users only ever see their own favorites; `"all"` and foreign
/// user ids are admin-only.
fn resolve_scope(principal: &Principal, user: Option<&str>) -> Result<Option<UserId>, ApiError> {
    let requested = match user {
        None | Some("me") => return Ok(Some(principal.id)),
        Some("all") => None,
        Some(raw) => Some(raw.parse::<i64>().map(UserId::new).map_err(|_| {
            ApiError::bad_request(format!(
                "user must be \"me\", \"all\" or a user id, got \"{raw}\""
            ))
        })?),
    };

    if requested == Some(principal.id) || principal.is_admin() {
        Ok(requested)
    } else {
        Err(ApiError::forbidden("Action requires admin permissions"))
    }
}

/// `GET /favorites`
pub async fn list_favorites(
    State(state): State<FavoritesState>,
    RequireAuth(principal): RequireAuth,
    Query(query): Query<ListFavoritesQuery>,
) -> Result<Json<Vec<TrainingResponse>>, ApiError> {
    let scope = resolve_scope(&principal, query.user.as_deref())?;
    let trainings = state.repository.list(scope, query.page()).await?;
    Ok(Json(trainings.iter().map(TrainingResponse::from).collect()))
}

/// `POST /favorites`
pub async fn add_favorite(
    State(state): State<FavoritesState>,
    RequireAuth(principal): RequireAuth,
    Json(body): Json<FavoriteRequest>,
) -> Result<StatusCode, ApiError> {
    let training = TrainingId::new(body.training_id);
    state.repository.favorite(principal.id, training).await?;

    // Best-effort: a lost report never fails the request.
    if let Err(e) = state
        .events
        .publish(Report::training_favorited(principal.id, training))
        .await
    {
        tracing::warn!(error = %e, training = %training, "failed to publish favorite report");
    }

    Ok(StatusCode::CREATED)
}

/// `DELETE /favorites/{training_id}`
pub async fn remove_favorite(
    State(state): State<FavoritesState>,
    RequireAuth(principal): RequireAuth,
    Path(training_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .repository
        .unfavorite(principal.id, TrainingId::new(training_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
