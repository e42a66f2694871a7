//! Multimedia URL value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum URL length in characters.
pub const MEDIA_URL_MAX: usize = 255;

/// A URL-like reference to an image or video attached to a training.
///
/// Surrounding whitespace is stripped on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaUrl(String);

impl MediaUrl {
    pub fn new(url: impl AsRef<str>) -> Result<Self, ValidationError> {
        let url = url.as_ref().trim().to_string();
        let len = url.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyField { field: "multimedia" });
        }
        if len > MEDIA_URL_MAX {
            return Err(ValidationError::length_out_of_range(
                "multimedia",
                1,
                MEDIA_URL_MAX,
                len,
            ));
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_surrounding_whitespace() {
        let url = MediaUrl::new("  https://example.com/video.mp4  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/video.mp4");
    }

    #[test]
    fn rejects_empty() {
        assert!(MediaUrl::new("   ").is_err());
    }

    #[test]
    fn rejects_overlong() {
        assert!(MediaUrl::new("x".repeat(256)).is_err());
    }
}
