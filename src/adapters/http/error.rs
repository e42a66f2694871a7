//! Mapping from domain errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::training::TrainingError;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// HTTP-facing wrapper over [`TrainingError`].
///
/// Handlers return this so `?` propagates repository errors straight into
/// the right status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// A 400 for malformed query or path input the type system let through.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.into(),
                code: "VALIDATION_ERROR",
            },
        }
    }

    /// A 403 for an authenticated caller lacking the required role.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            body: ErrorBody {
                error: message.into(),
                code: "FORBIDDEN",
            },
        }
    }
}

impl From<TrainingError> for ApiError {
    fn from(err: TrainingError) -> Self {
        let (status, code, message) = match &err {
            TrainingError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
            TrainingError::ScoreNotFound { .. } => {
                (StatusCode::NOT_FOUND, "SCORE_NOT_FOUND", err.to_string())
            }
            TrainingError::FavoriteNotFound { .. } => {
                (StatusCode::NOT_FOUND, "FAVORITE_NOT_FOUND", err.to_string())
            }
            TrainingError::DuplicateTitle { .. } => {
                (StatusCode::CONFLICT, "DUPLICATE_TITLE", err.to_string())
            }
            TrainingError::NotAuthor { .. } => {
                (StatusCode::UNAUTHORIZED, "NOT_AUTHOR", err.to_string())
            }
            TrainingError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
            }
            TrainingError::Storage(detail) => {
                tracing::error!(error = %detail, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        Self {
            status,
            body: ErrorBody {
                error: message,
                code,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{TrainingId, UserId, ValidationError};

    fn status_of(err: TrainingError) -> StatusCode {
        ApiError::from(err).status
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_of(TrainingError::NotFound(TrainingId::new(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(TrainingError::ScoreNotFound {
                training: TrainingId::new(1),
                user: UserId::new(2),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(TrainingError::DuplicateTitle {
                title: "5k run".into()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(TrainingError::NotAuthor {
                training: TrainingId::new(1),
                user: UserId::new(2),
            }),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(TrainingError::Validation(ValidationError::EmptyField {
                field: "title"
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(TrainingError::storage("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_title_message_names_the_title() {
        let err = ApiError::from(TrainingError::DuplicateTitle {
            title: "5k run".into(),
        });
        assert!(err.body.error.contains("5k run"));
    }

    #[test]
    fn storage_detail_is_not_leaked() {
        let err = ApiError::from(TrainingError::storage("connection refused to 10.0.0.5"));
        assert_eq!(err.body.error, "Internal server error");
    }
}
