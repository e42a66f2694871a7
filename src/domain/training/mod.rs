//! Training aggregate and its value objects.
//!
//! A training is a workout plan with a globally unique title, a type, a
//! difficulty, embedded multimedia/goal collections, a moderation flag, and
//! an aggregate score derived from per-user score rows.

mod aggregate;
mod draft;
mod errors;
mod goal;
mod media;
mod score;
mod training_type;

pub use aggregate::Training;
pub use draft::{NewTraining, TrainingPatch};
pub use errors::TrainingError;
pub use goal::Goal;
pub use media::MediaUrl;
pub use score::{ScoreValue, MAX_SCORE, MIN_SCORE, SCORE_SCALE};
pub use training_type::TrainingType;

/// Minimum title length in characters.
pub const TITLE_MIN: usize = 2;
/// Maximum title length in characters.
pub const TITLE_MAX: usize = 30;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 300;
/// Minimum difficulty (inclusive).
pub const MIN_DIFFICULTY: u8 = 0;
/// Maximum difficulty (inclusive).
pub const MAX_DIFFICULTY: u8 = 10;
/// Maximum number of multimedia resources per training.
pub const MAX_MULTIMEDIA: usize = 8;
/// Maximum number of goals per training.
pub const MAX_GOALS: usize = 64;
