use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{AuthToken, AuthorizeUrlResponse, TokenExchangeRequest, TokenRefreshRequest};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/url", get(authorize_url))
        .route("/token", post(exchange_token))
        .route("/refresh", post(refresh_token))
}

async fn authorize_url(State(state): State<Arc<AppState>>) -> Result<Json<AuthorizeUrlResponse>> {
    // The browser keeps `state` and compares it when Spotify redirects back
    let csrf_state = Uuid::new_v4().to_string();
    let authorize_url = state.spotify_auth.authorize_url(&csrf_state)?;

    Ok(Json(AuthorizeUrlResponse {
        authorize_url,
        state: csrf_state,
    }))
}

async fn exchange_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenExchangeRequest>,
) -> Result<Json<AuthToken>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let token = state.spotify_auth.exchange_code(&req.code).await?;
    Ok(Json(token))
}

async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenRefreshRequest>,
) -> Result<Json<AuthToken>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let token = state.spotify_auth.refresh(&req.refresh_token).await?;
    Ok(Json(token))
}
