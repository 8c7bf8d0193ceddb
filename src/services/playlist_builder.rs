//! Mood playlist generation.
//!
//! Two search strategies feed one deduplicating pool:
//! 1. Genre-seeded recommendations, biased by the mood's target valence
//! 2. Keyword track search in a single market
//!
//! A failing seed query is logged and skipped. The pool is shuffled and the
//! first 30 tracks go into a fresh playlist. When both strategies come back
//! empty the caller gets a curated playlist for the mood instead.

use crate::error::{AppError, Result};
use crate::models::playlist::{playlist_description, playlist_name};
use crate::models::{AuthToken, Mood, MoodSeeds, TrackUri};
use crate::services::catalog::MusicCatalog;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Tracks requested per genre or keyword
const SEED_TRACK_LIMIT: usize = 5;
const SEARCH_MARKET: &str = "US";
const MAX_PLAYLIST_TRACKS: usize = 30;

#[derive(Debug, Clone, Copy)]
enum SeedQuery<'a> {
    Genre(&'a str),
    Keyword(&'a str),
}

impl fmt::Display for SeedQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedQuery::Genre(genre) => write!(f, "genre {}", genre),
            SeedQuery::Keyword(keyword) => write!(f, "keyword {}", keyword),
        }
    }
}

pub struct PlaylistBuilder {
    catalog: Arc<dyn MusicCatalog>,
}

impl PlaylistBuilder {
    pub fn new(catalog: Arc<dyn MusicCatalog>) -> Self {
        Self { catalog }
    }

    /// Build a playlist for `mood` on behalf of the token's user and return its URL.
    ///
    /// `mood` is matched case-insensitively; unknown labels are treated as neutral.
    pub async fn build(&self, mood: &str, token: Option<&AuthToken>) -> Result<String> {
        let access_token = token
            .and_then(AuthToken::access_token)
            .ok_or(AppError::InvalidCredential)?;

        let resolved = Mood::from_label(mood);
        info!("Building playlist for mood '{}' (resolved: {})", mood, resolved);

        let tracks = self
            .collect_tracks(access_token, resolved, MoodSeeds::lookup(mood))
            .await;
        info!("Collected {} unique tracks for mood {}", tracks.len(), resolved);

        let track_list = shuffled(tracks);

        self.publish(access_token, mood, resolved, track_list)
            .await
            .map_err(|e| {
                error!("Error creating playlist: {}", e);
                AppError::PlaylistCreationFailed(e.to_string())
            })
    }

    async fn collect_tracks(
        &self,
        access_token: &str,
        mood: Mood,
        seeds: &'static MoodSeeds,
    ) -> HashSet<TrackUri> {
        let mut outcomes = Vec::with_capacity(seeds.genres.len() + seeds.keywords.len());

        for &genre in seeds.genres {
            let result = self
                .catalog
                .recommendations(access_token, genre, SEED_TRACK_LIMIT, mood.target_valence())
                .await;
            outcomes.push((SeedQuery::Genre(genre), result));
        }

        for &keyword in seeds.keywords {
            let result = self
                .catalog
                .search_tracks(access_token, keyword, SEARCH_MARKET, SEED_TRACK_LIMIT)
                .await;
            outcomes.push((SeedQuery::Keyword(keyword), result));
        }

        let mut tracks = HashSet::new();
        for (query, result) in outcomes {
            match result {
                Ok(found) => {
                    debug!("Found {} tracks for {}", found.len(), query);
                    tracks.extend(found);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", query, e);
                }
            }
        }
        tracks
    }

    async fn publish(
        &self,
        access_token: &str,
        label: &str,
        mood: Mood,
        track_list: Vec<TrackUri>,
    ) -> Result<String> {
        let user_id = self.catalog.current_user_id(access_token).await?;

        // Created even when there is nothing to add; the empty playlist is left in place
        let playlist = self
            .catalog
            .create_playlist(
                access_token,
                &user_id,
                &playlist_name(label),
                &playlist_description(label),
            )
            .await?;

        if track_list.is_empty() {
            info!("No tracks found for mood {}, returning curated playlist", mood);
            return Ok(mood.fallback_playlist_url());
        }

        let selected = &track_list[..track_list.len().min(MAX_PLAYLIST_TRACKS)];
        self.catalog
            .add_tracks(access_token, &playlist.id, selected)
            .await?;

        info!("Playlist {} populated with {} tracks", playlist.id, selected.len());
        Ok(playlist.url)
    }
}

fn shuffled(tracks: HashSet<TrackUri>) -> Vec<TrackUri> {
    let mut list: Vec<TrackUri> = tracks.into_iter().collect();
    list.shuffle(&mut rand::thread_rng());
    list
}
