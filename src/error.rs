use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid or missing Spotify authentication token")]
    InvalidCredential,

    #[error("Failed to create playlist: {0}")]
    PlaylistCreationFailed(String),

    #[error("Spotify error: {0}")]
    Spotify(String),

    #[error("Emotion service error: {0}")]
    EmotionService(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidCredential => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::PlaylistCreationFailed(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::Spotify(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::EmotionService(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
