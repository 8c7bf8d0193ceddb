use crate::api::middleware::SpotifyToken;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{CreatePlaylistRequest, PlaylistResponse};
use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;

pub fn playlist_routes() -> Router<Arc<AppState>> {
    Router::new().route("/playlists", post(create_playlist))
}

async fn create_playlist(
    State(state): State<Arc<AppState>>,
    SpotifyToken(token): SpotifyToken,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Json<PlaylistResponse>> {
    let url = state
        .playlist_builder
        .build(&req.mood, token.as_ref())
        .await?;

    Ok(Json(PlaylistResponse { url }))
}
