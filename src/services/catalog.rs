use crate::error::Result;
use crate::models::{CreatedPlaylist, TrackUri};
use async_trait::async_trait;

/// The slice of a streaming service's Web API the playlist builder consumes.
///
/// Every call takes the caller's access token explicitly; implementations
/// hold no per-user state.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Genre-seeded recommendations biased toward `target_valence` (0.0 to 1.0).
    async fn recommendations(
        &self,
        access_token: &str,
        genre: &str,
        limit: usize,
        target_valence: f32,
    ) -> Result<Vec<TrackUri>>;

    /// Free-text track search scoped to one market.
    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<TrackUri>>;

    async fn current_user_id(&self, access_token: &str) -> Result<String>;

    async fn create_playlist(
        &self,
        access_token: &str,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatedPlaylist>;

    async fn add_tracks(&self, access_token: &str, playlist_id: &str, uris: &[TrackUri]) -> Result<()>;
}
