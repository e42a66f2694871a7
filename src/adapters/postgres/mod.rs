//! PostgreSQL repository implementations.

mod favorites_repository;
mod training_repository;

pub use favorites_repository::PostgresFavoritesRepository;
pub use training_repository::PostgresTrainingRepository;
