pub mod auth;
pub mod mood;
pub mod playlist;

pub use auth::{AuthToken, AuthorizeUrlResponse, TokenExchangeRequest, TokenRefreshRequest};
pub use mood::{Mood, MoodSeeds};
pub use playlist::{CreatePlaylistRequest, CreatedPlaylist, EmotionResponse, PlaylistResponse, TrackUri};
