use serde::{Deserialize, Serialize};

/// Opaque Spotify track URI, e.g. `spotify:track:4uLU6hMCjMI75M1A2tKUQC`.
pub type TrackUri = String;

/// Playlist as returned by the catalog right after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub mood: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmotionResponse {
    pub mood: String,
}

/// `"Your Happy Mood Mix"`. Uses the caller's label verbatim apart from case,
/// so an unrecognized label still names the playlist.
pub fn playlist_name(mood: &str) -> String {
    format!("Your {} Mood Mix", capitalize(mood))
}

pub fn playlist_description(mood: &str) -> String {
    format!("Custom playlist generated based on your {} mood", mood)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_name_capitalizes() {
        assert_eq!(playlist_name("happy"), "Your Happy Mood Mix");
        assert_eq!(playlist_name("SAD"), "Your Sad Mood Mix");
        assert_eq!(playlist_name("unknown_xyz"), "Your Unknown_xyz Mood Mix");
        assert_eq!(playlist_name(""), "Your  Mood Mix");
    }

    #[test]
    fn test_playlist_description_keeps_label() {
        assert_eq!(
            playlist_description("Fear"),
            "Custom playlist generated based on your Fear mood"
        );
    }
}
