pub mod catalog;
pub mod emotion;
pub mod playlist_builder;
pub mod spotify;
pub mod spotify_auth;

pub use catalog::MusicCatalog;
pub use emotion::{DeepFaceClassifier, EmotionClassifier};
pub use playlist_builder::PlaylistBuilder;
pub use spotify::SpotifyClient;
pub use spotify_auth::SpotifyAuth;
