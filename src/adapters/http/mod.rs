//! HTTP adapter: axum routers, wire types, and middleware.

pub mod error;
pub mod favorites;
pub mod middleware;
pub mod trainings;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ports::TokenVerifier;

pub use favorites::FavoritesState;
pub use trainings::TrainingsState;

/// Assembles the full application router.
///
/// Every route sits behind the auth middleware; per-route requirements are
/// expressed through the `RequireAuth`/`RequireAdmin` extractors.
pub fn app_router(
    trainings_state: TrainingsState,
    favorites_state: FavoritesState,
    verifier: Arc<dyn TokenVerifier>,
) -> Router {
    Router::new()
        .nest("/trainings", trainings::training_routes(trainings_state))
        .nest("/favorites", favorites::favorite_routes(favorites_state))
        .layer(axum::middleware::from_fn_with_state(
            verifier,
            middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
