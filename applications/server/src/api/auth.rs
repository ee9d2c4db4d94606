/// Authentication API routes
use crate::{
    api::IdResponse,
    error::{Result, ServerError},
    extract::ApiJson,
    services::auth::TokenPair,
    state::AppState,
};
use audioshare_core::CreateUser;
use axum::{extract::State, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// POST /auth/sign-up
pub async fn sign_up(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<CreateUser>,
) -> Result<Json<IdResponse>> {
    req.validate()?;

    let username = req.username.clone();
    let id = app_state.credentials.create_user(req).await?;
    tracing::info!(user_id = %id, %username, "user signed up");

    Ok(Json(IdResponse { id: id.get() }))
}

/// POST /auth/sign-in
pub async fn sign_in(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<SignInRequest>,
) -> Result<Json<TokenPair>> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ServerError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let user = app_state
        .credentials
        .get_user(&req.username, &req.password)
        .await?;

    let tokens = app_state.auth_service.issue_session(user.id).await?;
    tracing::debug!(user_id = %user.id, "user signed in");

    Ok(Json(tokens))
}

/// POST /auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<Json<TokenPair>> {
    if req.refresh_token.is_empty() {
        return Err(ServerError::BadRequest("refresh_token is required".to_string()));
    }

    let tokens = app_state
        .auth_service
        .refresh_session(&req.refresh_token)
        .await?;

    Ok(Json(tokens))
}
