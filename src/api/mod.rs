pub mod auth;
pub mod emotion;
pub mod middleware;
pub mod playlists;

pub use auth::auth_routes;
pub use emotion::emotion_routes;
pub use playlists::playlist_routes;

use crate::frontend;
use crate::services::{EmotionClassifier, PlaylistBuilder, SpotifyAuth};
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub spotify_auth: Arc<SpotifyAuth>,
    pub emotion_classifier: Arc<dyn EmotionClassifier>,
    pub playlist_builder: Arc<PlaylistBuilder>,
}

pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .nest("/auth", auth_routes())
                .merge(emotion_routes())
                .merge(playlist_routes())
                .with_state(state),
        )
        .route("/health", get(|| async { "ok" }))
        // Frontend upload page - catch-all route (must be last)
        .fallback(get(frontend::serve_frontend))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Result;
    use crate::models::{CreatedPlaylist, EmotionResponse, Mood, PlaylistResponse, TrackUri};
    use crate::services::emotion::Detection;
    use crate::services::MusicCatalog;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use bytes::Bytes;
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Catalog that knows a single keyword and counts every call.
    #[derive(Default)]
    struct StubCatalog {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MusicCatalog for StubCatalog {
        async fn recommendations(&self, _: &str, _: &str, _: usize, _: f32) -> Result<Vec<TrackUri>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn search_tracks(&self, _: &str, query: &str, _: &str, _: usize) -> Result<Vec<TrackUri>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query == "joy" {
                Ok(vec!["spotify:track:j1".to_string()])
            } else {
                Ok(vec![])
            }
        }

        async fn current_user_id(&self, _: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("me".to_string())
        }

        async fn create_playlist(&self, _: &str, _: &str, _: &str, _: &str) -> Result<CreatedPlaylist> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CreatedPlaylist {
                id: "p".to_string(),
                url: "https://open.spotify.com/playlist/p".to_string(),
            })
        }

        async fn add_tracks(&self, _: &str, _: &str, _: &[TrackUri]) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct StubClassifier;

    #[async_trait]
    impl EmotionClassifier for StubClassifier {
        async fn detect(&self, _image: Bytes) -> Result<Detection> {
            Ok(Detection::Emotion("happy".to_string()))
        }
    }

    fn app(catalog: Arc<StubCatalog>) -> Router {
        let config = Config::for_tests();
        let state = Arc::new(AppState {
            spotify_auth: Arc::new(SpotifyAuth::new(&config, reqwest::Client::new())),
            emotion_classifier: Arc::new(StubClassifier),
            playlist_builder: Arc::new(PlaylistBuilder::new(catalog)),
        });
        router(state, config.max_upload_bytes)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn playlist_request(mood: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/playlists")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
            .body(Body::from(serde_json::json!({ "mood": mood }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_playlist_without_token_is_unauthorized() {
        let catalog = Arc::new(StubCatalog::default());
        let response = app(catalog.clone())
            .oneshot(playlist_request("happy", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_playlist_with_token_returns_url() {
        let catalog = Arc::new(StubCatalog::default());
        let response = app(catalog.clone())
            .oneshot(playlist_request("happy", Some("abc")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: PlaylistResponse = body_json(response).await;
        assert_eq!(body.url, "https://open.spotify.com/playlist/p");
    }

    #[tokio::test]
    async fn test_lowercase_bearer_scheme_is_accepted() {
        let catalog = Arc::new(StubCatalog::default());
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/playlists")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "bearer abc")
            .body(Body::from(r#"{"mood": "happy"}"#))
            .unwrap();

        let response = app(catalog.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(catalog.calls.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_playlist_for_unknown_mood_falls_back() {
        let catalog = Arc::new(StubCatalog::default());
        let response = app(catalog)
            .oneshot(playlist_request("unknown_xyz", Some("abc")))
            .await
            .unwrap();

        let body: PlaylistResponse = body_json(response).await;
        assert_eq!(body.url, Mood::Neutral.fallback_playlist_url());
    }

    #[tokio::test]
    async fn test_emotion_upload_reports_label() {
        let boundary = "XBOUNDARY";
        let payload = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"me.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\r\nfakejpeg\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/emotion")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(payload))
            .unwrap();

        let response = app(Arc::new(StubCatalog::default()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: EmotionResponse = body_json(response).await;
        assert_eq!(body.mood, "happy");
    }

    #[tokio::test]
    async fn test_emotion_upload_without_image_is_rejected() {
        let boundary = "XBOUNDARY";
        let payload = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/emotion")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(payload))
            .unwrap();

        let response = app(Arc::new(StubCatalog::default()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_authorize_url_includes_fresh_state() {
        let request = Request::builder()
            .uri("/api/v1/auth/url")
            .body(Body::empty())
            .unwrap();

        let response = app(Arc::new(StubCatalog::default()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = body_json(response).await;
        let state = body["state"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(state).is_ok());
        assert!(body["authorize_url"].as_str().unwrap().contains(state));
    }

    #[tokio::test]
    async fn test_token_exchange_requires_code() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"code": ""}"#))
            .unwrap();

        let response = app(Arc::new(StubCatalog::default()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(Arc::new(StubCatalog::default()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
