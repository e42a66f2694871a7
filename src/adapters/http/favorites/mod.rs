//! Favorites HTTP surface.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::FavoritesState;
pub use routes::favorite_routes;
