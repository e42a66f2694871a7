//! Route table for the favorites surface.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{add_favorite, list_favorites, remove_favorite, FavoritesState};

pub fn favorite_routes(state: FavoritesState) -> Router {
    Router::new()
        .route("/", get(list_favorites).post(add_favorite))
        .route("/:training_id", delete(remove_favorite))
        .with_state(state)
}
