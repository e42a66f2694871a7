//! In-memory repository implementations.
//!
//! Back the same ports as the postgres adapters, over a shared mutex-guarded
//! store. Used by unit and integration tests; not meant for production.

mod favorites_repository;
mod store;
mod training_repository;

pub use favorites_repository::InMemoryFavoritesRepository;
pub use store::InMemoryStore;
pub use training_repository::InMemoryTrainingRepository;
