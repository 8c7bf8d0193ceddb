use crate::error::{AppError, Result};
use crate::models::{CreatedPlaylist, TrackUri};
use crate::services::catalog::MusicCatalog;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationsResponse {
    #[serde(default)]
    tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    // Spotify occasionally returns null entries for unavailable items
    #[serde(default)]
    items: Vec<Option<SpotifyTrack>>,
}

#[derive(Debug, Deserialize)]
struct CurrentUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistObject {
    id: String,
    external_urls: ExternalUrls,
}

#[derive(Debug, Serialize)]
struct CreatePlaylistBody<'a> {
    name: &'a str,
    public: bool,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct AddTracksBody<'a> {
    uris: &'a [TrackUri],
}

impl SpotifyClient {
    pub fn new(base_url: String, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Spotify(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Spotify(format!(
                "API returned status: {} - {}",
                status, body
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Spotify(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&text).map_err(|e| {
            AppError::Spotify(format!(
                "Failed to parse response: {} - Response: {}",
                e,
                text.chars().take(200).collect::<String>()
            ))
        })
    }
}

fn playlist_from(object: PlaylistObject) -> CreatedPlaylist {
    let url = object
        .external_urls
        .spotify
        .unwrap_or_else(|| format!("https://open.spotify.com/playlist/{}", object.id));

    CreatedPlaylist { id: object.id, url }
}

#[async_trait]
impl MusicCatalog for SpotifyClient {
    async fn recommendations(
        &self,
        access_token: &str,
        genre: &str,
        limit: usize,
        target_valence: f32,
    ) -> Result<Vec<TrackUri>> {
        tracing::debug!("Requesting recommendations for genre: {}", genre);

        let request = self
            .client
            .get(self.url("/recommendations"))
            .bearer_auth(access_token)
            .query(&[
                ("seed_genres", genre.to_string()),
                ("limit", limit.to_string()),
                ("target_valence", target_valence.to_string()),
            ]);

        let data: RecommendationsResponse = self.send(request).await?;
        Ok(data.tracks.into_iter().map(|t| t.uri).collect())
    }

    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<TrackUri>> {
        tracing::debug!("Searching Spotify tracks with query: {}", query);

        let request = self
            .client
            .get(self.url("/search"))
            .bearer_auth(access_token)
            .query(&[
                ("q", query.to_string()),
                ("type", "track".to_string()),
                ("limit", limit.to_string()),
                ("market", market.to_string()),
            ]);

        let data: SearchResponse = self.send(request).await?;
        Ok(data.tracks.items.into_iter().flatten().map(|t| t.uri).collect())
    }

    async fn current_user_id(&self, access_token: &str) -> Result<String> {
        let request = self.client.get(self.url("/me")).bearer_auth(access_token);
        let user: CurrentUser = self.send(request).await?;
        Ok(user.id)
    }

    async fn create_playlist(
        &self,
        access_token: &str,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatedPlaylist> {
        let request = self
            .client
            .post(self.url(&format!("/users/{}/playlists", user_id)))
            .bearer_auth(access_token)
            .json(&CreatePlaylistBody {
                name,
                public: true,
                description,
            });

        let playlist: PlaylistObject = self.send(request).await?;
        tracing::info!("Created playlist '{}' ({}) for user {}", name, playlist.id, user_id);
        Ok(playlist_from(playlist))
    }

    async fn add_tracks(&self, access_token: &str, playlist_id: &str, uris: &[TrackUri]) -> Result<()> {
        let request = self
            .client
            .post(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(access_token)
            .json(&AddTracksBody { uris });

        // Response carries only a snapshot id
        let _: serde_json::Value = self.send(request).await?;
        tracing::debug!("Added {} tracks to playlist {}", uris.len(), playlist_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = SpotifyClient::new("https://api.spotify.com/v1/".to_string(), Client::new());
        assert_eq!(client.url("/me"), "https://api.spotify.com/v1/me");
    }

    #[test]
    fn test_search_response_skips_null_items() {
        let data: SearchResponse = serde_json::from_str(
            r#"{"tracks": {"href": "x", "items": [
                {"uri": "spotify:track:1", "name": "One"},
                null,
                {"uri": "spotify:track:2", "name": "Two"}
            ]}}"#,
        )
        .unwrap();

        let uris: Vec<String> = data.tracks.items.into_iter().flatten().map(|t| t.uri).collect();
        assert_eq!(uris, vec!["spotify:track:1", "spotify:track:2"]);
    }

    #[test]
    fn test_recommendations_response_parses() {
        let data: RecommendationsResponse = serde_json::from_str(
            r#"{"seeds": [], "tracks": [{"uri": "spotify:track:a", "id": "a"}]}"#,
        )
        .unwrap();
        assert_eq!(data.tracks.len(), 1);
        assert_eq!(data.tracks[0].uri, "spotify:track:a");
    }

    #[test]
    fn test_playlist_url_falls_back_to_id() {
        let object: PlaylistObject =
            serde_json::from_str(r#"{"id": "p1", "external_urls": {}}"#).unwrap();
        assert_eq!(
            playlist_from(object),
            CreatedPlaylist {
                id: "p1".to_string(),
                url: "https://open.spotify.com/playlist/p1".to_string(),
            }
        );

        let object: PlaylistObject = serde_json::from_str(
            r#"{"id": "p2", "external_urls": {"spotify": "https://open.spotify.com/playlist/p2x"}}"#,
        )
        .unwrap();
        assert_eq!(playlist_from(object).url, "https://open.spotify.com/playlist/p2x");
    }
}
