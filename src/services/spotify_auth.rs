use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::AuthToken;
use chrono::Utc;
use reqwest::{Client, Url};

/// Scopes needed to create public playlists for the signed-in user.
pub const SCOPES: &str = "playlist-modify-public user-library-read";

/// Authorization-code flow against the Spotify accounts service.
///
/// Issued tokens are handed straight back to the caller, nothing is cached here.
pub struct SpotifyAuth {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    accounts_url: String,
    client: Client,
}

impl SpotifyAuth {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            redirect_uri: config.spotify_redirect_uri.clone(),
            accounts_url: config.spotify_accounts_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn authorize_url(&self, state: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &format!("{}/authorize", self.accounts_url),
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", SCOPES),
                ("state", state),
            ],
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid accounts URL: {}", e)))?;

        Ok(url.to_string())
    }

    pub async fn exchange_code(&self, code: &str) -> Result<AuthToken> {
        tracing::info!("Exchanging authorization code for access token");
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthToken> {
        tracing::info!("Refreshing access token");
        let mut token = self
            .request_token(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .await?;

        // Spotify only sometimes rotates the refresh token
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }
        Ok(token)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<AuthToken> {
        let response = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::Spotify(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Spotify token endpoint error: {} - {}", status, body);
            return Err(AppError::Spotify(format!(
                "Token endpoint returned status: {} - {}",
                status, body
            )));
        }

        let mut token: AuthToken = response
            .json()
            .await
            .map_err(|e| AppError::Spotify(format!("Failed to parse token response: {}", e)))?;

        if token.access_token().is_none() {
            return Err(AppError::Spotify("Token response had no access token".to_string()));
        }

        token.expires_at = Some(Utc::now().timestamp() + token.expires_in);
        Ok(token)
    }
}
