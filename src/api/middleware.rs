use crate::error::AppError;
use crate::models::AuthToken;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Spotify access token from `Authorization: Bearer ...`, if any.
///
/// Never rejects: deciding whether a missing token is acceptable is left to
/// the handler, so the playlist builder can report `InvalidCredential` itself.
pub struct SpotifyToken(pub Option<AuthToken>);

#[async_trait]
impl<S> FromRequestParts<S> for SpotifyToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_credentials)
            .map(AuthToken::bearer);

        Ok(SpotifyToken(token))
    }
}

/// Auth scheme names are case-insensitive, so `bearer abc` is accepted too.
fn bearer_credentials(header: &str) -> Option<&str> {
    let (scheme, credentials) = header.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| credentials.trim())
}
