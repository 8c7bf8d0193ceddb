use axum::{
    body::Body,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

// Selfie upload page and its assets
#[derive(RustEmbed)]
#[folder = "static"]
pub struct Assets;

pub async fn serve_frontend(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    if let Some(content) = Assets::get(path) {
        return serve_asset(path, content.data.into_owned());
    }

    // Spotify redirects back to `/?code=...`, which must land on the page
    if !path.starts_with("api/") {
        if let Some(content) = Assets::get("index.html") {
            return serve_asset("index.html", content.data.into_owned());
        }
    }

    not_found()
}

fn serve_asset(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, cache_control_value(path).to_string()),
        ],
        data,
    )
        .into_response()
}

fn cache_control_value(path: &str) -> &'static str {
    if path.ends_with(".html") || path.is_empty() {
        "public, max-age=0, must-revalidate"
    } else {
        "public, max-age=3600"
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Body::from("404 Not Found")).into_response()
}
