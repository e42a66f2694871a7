//! Scaled-integer score value.
//!
//! Scores are submitted as floats in [0.0, 5.0] but stored as integers
//! scaled by 100 and rounded on write, so aggregation over many rows never
//! accumulates floating-point drift. The mean exposed on a training is
//! `sum(raw) / (count * 100)`, computed on read.

use crate::domain::foundation::ValidationError;

/// Scale factor between the wire score and the stored integer.
pub const SCORE_SCALE: i64 = 100;
/// Smallest accepted score.
pub const MIN_SCORE: f64 = 0.0;
/// Largest accepted score.
pub const MAX_SCORE: f64 = 5.0;

/// A single user's score for a training, stored as `round(value * 100)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreValue(i64);

impl ScoreValue {
    /// Validates the wire value and scales it into the stored representation.
    pub fn try_from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(ValidationError::InvalidFormat {
                field: "score",
                reason: format!("must be between {} and {}, got {}", MIN_SCORE, MAX_SCORE, value),
            });
        }
        Ok(Self((value * SCORE_SCALE as f64).round() as i64))
    }

    /// Wraps a raw stored integer without re-validating.
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// The stored integer representation.
    pub fn raw(&self) -> i64 {
        self.0
    }

    /// The wire representation.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / SCORE_SCALE as f64
    }
}

/// Arithmetic mean over raw score integers, as exposed on a training.
///
/// Zero rows yield 0.0 rather than a division by zero.
pub fn mean_score(total_raw: i64, amount: u32) -> f64 {
    if amount == 0 {
        0.0
    } else {
        total_raw as f64 / (amount as i64 * SCORE_SCALE) as f64
    }
}
