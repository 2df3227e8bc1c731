use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use comparison::ComparisonError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Comparison error: {0}")]
    Comparison(#[from] ComparisonError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Comparison(ComparisonError::InvalidDate(field, detail)) => {
                tracing::info!(%field, %detail, "Rejected comparison request.");
                (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid date for '{}': {}", field, detail),
                )
            }
            AppError::Comparison(other) => {
                tracing::error!(error = ?other, "Comparison error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while running the comparison".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
