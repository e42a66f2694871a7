//! Goal value object.

use serde::{Deserialize, Serialize};

use super::DESCRIPTION_MAX;
use crate::domain::foundation::ValidationError;

/// Maximum goal name length in characters.
pub const GOAL_NAME_MAX: usize = 30;

/// A goal to fulfill in order to complete a training plan.
///
/// Owned by value by exactly one training; patched collections replace the
/// prior ones rather than merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    name: String,
    description: String,
}

impl Goal {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();

        let name_len = name.chars().count();
        if name_len == 0 {
            return Err(ValidationError::EmptyField { field: "goal.name" });
        }
        if name_len > GOAL_NAME_MAX {
            return Err(ValidationError::length_out_of_range(
                "goal.name",
                1,
                GOAL_NAME_MAX,
                name_len,
            ));
        }
        let description_len = description.chars().count();
        if description_len > DESCRIPTION_MAX {
            return Err(ValidationError::length_out_of_range(
                "goal.description",
                0,
                DESCRIPTION_MAX,
                description_len,
            ));
        }

        Ok(Self { name, description })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
