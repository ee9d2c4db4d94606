/// Share API routes
use crate::{
    api::{window, StatusResponse},
    error::Result,
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthenticatedUser,
    state::AppState,
};
use audioshare_core::types::{AudioId, Page, SharedCountsPage, UserId};
use axum::{extract::State, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub share_to: i64,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// POST /api/share/:id
pub async fn share_audio(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<ShareRequest>,
) -> Result<Json<StatusResponse>> {
    app_state
        .sharing
        .share(auth.user_id(), AudioId::new(id), UserId::new(req.share_to))
        .await?;

    tracing::info!(owner = %auth.user_id(), audio_id = id, target = req.share_to, "audio shared");
    Ok(Json(StatusResponse::ok()))
}

/// DELETE /api/share/:id
pub async fn unshare_audio(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<ShareRequest>,
) -> Result<Json<StatusResponse>> {
    app_state
        .sharing
        .unshare(auth.user_id(), AudioId::new(id), UserId::new(req.share_to))
        .await?;

    tracing::info!(owner = %auth.user_id(), audio_id = id, target = req.share_to, "audio unshared");
    Ok(Json(StatusResponse::ok()))
}

/// GET /api/shares
/// Shared audio counts per user across the whole system
pub async fn shared_counts(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<SharedCountsPage>> {
    let (offset, limit) = window(params.offset, params.limit)?;
    let counts = app_state
        .sharing
        .shared_counts(Page { offset, limit })
        .await?;
    Ok(Json(counts))
}
