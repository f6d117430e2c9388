use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// Input the grid builder refuses to work with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("word list is empty")]
    EmptyWordList,

    #[error("grid size {size} is outside the allowed range 1..={max}")]
    InvalidSize { size: usize, max: usize },

    #[error("{count} words exceeds the limit of {max}")]
    TooManyWords { count: usize, max: usize },
}

/// Errors returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("puzzle {0} not found")]
    PuzzleNotFound(Uuid),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Grid(_) => StatusCode::BAD_REQUEST,
            ApiError::PuzzleNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_maps_to_bad_request() {
        let response = ApiError::from(GridError::EmptyWordList).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_puzzle_maps_to_not_found() {
        let response = ApiError::PuzzleNotFound(Uuid::new_v4()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GridError::TooManyWords { count: 300, max: 200 }.to_string(),
            "300 words exceeds the limit of 200"
        );
        assert_eq!(
            GridError::InvalidSize { size: 0, max: 64 }.to_string(),
            "grid size 0 is outside the allowed range 1..=64"
        );
    }
}
