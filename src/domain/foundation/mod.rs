//! Foundation types shared across the domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, Principal};
pub use errors::ValidationError;
pub use ids::{TrainingId, UserId};
pub use timestamp::Timestamp;
