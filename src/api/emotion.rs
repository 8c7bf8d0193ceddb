use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::EmotionResponse;
use crate::services::emotion::detect_label;
use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

pub fn emotion_routes() -> Router<Arc<AppState>> {
    Router::new().route("/emotion", post(detect_emotion))
}

/// Accepts a multipart upload with an `image` field and reports the detected mood label.
async fn detect_emotion(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<EmotionResponse>> {
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {}", e)))?
    {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?;
            image = Some(data);
            break;
        }
    }

    let image = image
        .filter(|data| !data.is_empty())
        .ok_or_else(|| AppError::Validation("Upload a selfie in the 'image' field".to_string()))?;

    tracing::info!("Received {} byte image for emotion detection", image.len());

    let mood = detect_label(state.emotion_classifier.as_ref(), image).await;
    Ok(Json(EmotionResponse { mood }))
}
