//! Trainings HTTP surface.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::TrainingResponse;
pub use handlers::TrainingsState;
pub use routes::training_routes;
