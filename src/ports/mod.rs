//! Ports - trait interfaces between the domain and adapters.

mod event_publisher;
mod favorites_repository;
mod token_verifier;
mod training_repository;

pub use event_publisher::{EventPublisher, Report, ReportCommand, REPORT_SERVICE};
pub use favorites_repository::FavoritesRepository;
pub use token_verifier::TokenVerifier;
pub use training_repository::{Page, TrainingFilter, TrainingRepository};
