use serde::{Deserialize, Serialize};
use validator::Validate;

/// OAuth token as issued by the Spotify accounts service.
///
/// The server never stores these; the browser keeps the token and sends the
/// access token back on every playlist request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    /// Unix timestamp computed from `expires_in` when the token was issued
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl AuthToken {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            ..Default::default()
        }
    }

    /// The access token, if present and nonempty.
    pub fn access_token(&self) -> Option<&str> {
        let token = self.access_token.trim();
        (!token.is_empty()).then_some(token)
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorizeUrlResponse {
    pub authorize_url: String,
    pub state: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TokenExchangeRequest {
    #[validate(length(min = 1))]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TokenRefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_access_token_is_invalid() {
        let token: AuthToken = serde_json::from_str(r#"{"token_type": "Bearer"}"#).unwrap();
        assert!(token.access_token().is_none());

        let token: AuthToken = serde_json::from_str(r#"{"access_token": "  "}"#).unwrap();
        assert!(token.access_token().is_none());
    }

    #[test]
    fn test_spotify_token_response_parses() {
        let token: AuthToken = serde_json::from_str(
            r#"{
                "access_token": "BQD",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "AQB",
                "scope": "playlist-modify-public user-library-read"
            }"#,
        )
        .unwrap();

        assert_eq!(token.access_token(), Some("BQD"));
        assert_eq!(token.expires_in, 3600);
        assert_eq!(token.refresh_token.as_deref(), Some("AQB"));
        assert!(token.expires_at.is_none());
    }
}
