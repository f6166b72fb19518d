//! HTTP error mapping

use crate::domain::errors::ScoringError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    /// Body could not be read or deserialized
    #[error(transparent)]
    Rejection(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            ApiError::Scoring(ScoringError::Validation(err)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                err.to_string(),
                Some(json!(err.violations)),
            ),
            ApiError::Rejection(rejection) => (rejection.status(), rejection.body_text(), None),
            ApiError::Scoring(err @ ScoringError::ModelUnavailable { .. }) => {
                tracing::warn!("{}", err);
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string(), None)
            }
            ApiError::Scoring(ScoringError::Classifier(err)) => {
                tracing::error!("Classifier error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": message,
            "status": status.as_u16()
        });
        if let Some(detail) = detail {
            body["detail"] = detail;
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ClassifierError, FieldViolation, ValidationError};

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::from(ScoringError::from(ValidationError::new(vec![
            FieldViolation {
                field: "txn_amount".to_string(),
                message: "txn_amount must be >= 0".to_string(),
            },
        ])));
        assert_eq!(
            validation.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let unavailable = ApiError::from(ScoringError::ModelUnavailable {
            path: "models/model.json".into(),
            reason: "not found".to_string(),
        });
        assert_eq!(
            unavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let internal = ApiError::from(ScoringError::from(ClassifierError::Internal {
            reason: "boom".to_string(),
        }));
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
