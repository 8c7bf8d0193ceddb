//! Facial emotion classification.
//!
//! The model itself runs out of process. We post the uploaded image to a
//! DeepFace-compatible `analyze` endpoint and read back the dominant emotion.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client};
use serde::Deserialize;

/// Reported when the classifier finds no face in the image.
pub const NO_RESULT_LABEL: &str = "Neutral";
/// Reported when the classifier could not be reached or answered garbage.
pub const ERROR_LABEL: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Emotion(String),
    NoFace,
}

impl Detection {
    pub fn label(&self) -> &str {
        match self {
            Detection::Emotion(label) => label,
            Detection::NoFace => NO_RESULT_LABEL,
        }
    }
}

#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn detect(&self, image: Bytes) -> Result<Detection>;
}

/// Runs the classifier and collapses every failure into the error sentinel,
/// which the mood table later resolves to neutral.
pub async fn detect_label(classifier: &dyn EmotionClassifier, image: Bytes) -> String {
    match classifier.detect(image).await {
        Ok(detection) => detection.label().to_string(),
        Err(e) => {
            tracing::warn!("Error in emotion detection: {}", e);
            ERROR_LABEL.to_string()
        }
    }
}

pub struct DeepFaceClassifier {
    url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct FaceAnalysis {
    dominant_emotion: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnalyzeResponse {
    List(Vec<FaceAnalysis>),
    Wrapped { results: Vec<FaceAnalysis> },
}

impl AnalyzeResponse {
    fn into_detection(self) -> Detection {
        let faces = match self {
            AnalyzeResponse::List(faces) => faces,
            AnalyzeResponse::Wrapped { results } => results,
        };

        faces
            .into_iter()
            .next()
            .map(|face| Detection::Emotion(face.dominant_emotion))
            .unwrap_or(Detection::NoFace)
    }
}

impl DeepFaceClassifier {
    pub fn new(url: String, client: Client) -> Self {
        Self { url, client }
    }
}

#[async_trait]
impl EmotionClassifier for DeepFaceClassifier {
    async fn detect(&self, image: Bytes) -> Result<Detection> {
        tracing::debug!("Sending {} byte image to emotion service", image.len());

        let part = multipart::Part::bytes(image.to_vec()).file_name("upload.jpg");
        let form = multipart::Form::new()
            .text("actions", "emotion")
            .part("img", part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::EmotionService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::EmotionService(format!(
                "Service returned status: {} - {}",
                status, body
            )));
        }

        let analysis: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| AppError::EmotionService(format!("Failed to parse response: {}", e)))?;

        let detection = analysis.into_detection();
        tracing::info!("Detected emotion: {}", detection.label());
        Ok(detection)
    }
}
