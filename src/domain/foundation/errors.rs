//! Validation errors for value object construction.

use thiserror::Error;

/// Errors that occur while validating request-shaped input into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Field '{field}' must be between {min} and {max} characters, got {actual}")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' holds at most {max} items, got {actual}")]
    TooManyItems {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' contains a duplicate entry: {value}")]
    DuplicateItem { field: &'static str, value: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn length_out_of_range(field: &'static str, min: usize, max: usize, actual: usize) -> Self {
        ValidationError::LengthOutOfRange {
            field,
            min,
            max,
            actual,
        }
    }

    pub fn out_of_range(field: &'static str, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field,
            min,
            max,
            actual,
        }
    }

    pub fn too_many_items(field: &'static str, max: usize, actual: usize) -> Self {
        ValidationError::TooManyItems { field, max, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_out_of_range_displays_bounds() {
        let err = ValidationError::length_out_of_range("title", 2, 30, 1);
        assert_eq!(
            err.to_string(),
            "Field 'title' must be between 2 and 30 characters, got 1"
        );
    }

    #[test]
    fn out_of_range_displays_bounds() {
        let err = ValidationError::out_of_range("difficulty", 0, 10, 11);
        assert_eq!(
            err.to_string(),
            "Field 'difficulty' must be between 0 and 10, got 11"
        );
    }

    #[test]
    fn too_many_items_displays_cap() {
        let err = ValidationError::too_many_items("multimedia", 8, 9);
        assert_eq!(
            err.to_string(),
            "Field 'multimedia' holds at most 8 items, got 9"
        );
    }
}
