//! Route table for the trainings surface.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    count_trainings, create_training, get_my_score, get_training, list_trainings,
    set_block_status, submit_score, update_training, TrainingsState,
};

pub fn training_routes(state: TrainingsState) -> Router {
    Router::new()
        .route("/", get(list_trainings).post(create_training))
        .route("/count", get(count_trainings))
        .route("/:id", get(get_training).patch(update_training))
        .route("/:id/status", patch(set_block_status))
        .route("/:id/scores/me", get(get_my_score))
        .route("/:id/scores", post(submit_score))
        .with_state(state)
}
