/// API route modules
pub mod audio;
pub mod auth;
pub mod health;
pub mod shares;

use crate::{
    error::{Result, ServerError},
    middleware,
    services::file_storage::MAX_UPLOAD_BYTES,
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// `{"id": ...}` reply of create endpoints
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: i64,
}

/// `{"status": "ok"}` reply of mutation endpoints
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Validate an offset/limit pair from a query string
pub(crate) fn window(offset: Option<i64>, limit: Option<i64>) -> Result<(u32, u32)> {
    let offset = offset.ok_or_else(|| ServerError::BadRequest("offset is required".into()))?;
    let limit = limit.ok_or_else(|| ServerError::BadRequest("limit is required".into()))?;

    let offset = u32::try_from(offset)
        .map_err(|_| ServerError::BadRequest("offset must be a non-negative integer".into()))?;
    let limit = u32::try_from(limit)
        .ok()
        .filter(|l| *l >= 1)
        .ok_or_else(|| ServerError::BadRequest("limit must be a positive integer".into()))?;

    Ok((offset, limit))
}

/// Build the full application router
pub fn router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/refresh", post(auth::refresh));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route(
            "/audio/",
            get(audio::list_audio)
                .post(audio::upload_audio)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/audio/:id",
            get(audio::download_audio).put(audio::update_audio),
        )
        .route(
            "/share/:id",
            post(shares::share_audio).delete(shares::unshare_audio),
        )
        .route("/shares", get(shares::shared_counts))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api", protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
