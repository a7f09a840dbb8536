use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum JotterError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

/// Constraint violations are the only input validation this service performs,
/// so they are split off from other store failures here.
impl From<sqlx::Error> for JotterError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.kind() {
                ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation => {
                    return JotterError::Validation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        JotterError::Database(e)
    }
}

impl From<JsonRejection> for JotterError {
    fn from(rejection: JsonRejection) -> Self {
        JotterError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for JotterError {
    fn from(rejection: PathRejection) -> Self {
        JotterError::Validation(rejection.body_text())
    }
}

impl IntoResponse for JotterError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            JotterError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{what} not found."),
                },
            ),
            JotterError::Validation(reason) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_FAILED".to_string(),
                    message: reason,
                },
            ),
            JotterError::Database(ref e) => {
                error!(error = %e, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
            JotterError::Config(ref e) => {
                error!(error = %e, "configuration failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
