/// Audio API routes
use crate::{
    api::{window, IdResponse, StatusResponse},
    error::{Result, ServerError},
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthenticatedUser,
    services::file_storage::MAX_UPLOAD_BYTES,
    state::AppState,
};
use audioshare_core::types::{
    AudioId, AudioListPage, AudioListQuery, BlobId, OrderType, UpdateAudio, AAC_EXTENSION,
};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;

#[derive(Debug, Deserialize)]
pub struct AudioListParams {
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub order_type: Option<String>,
}

impl AudioListParams {
    fn into_query(self) -> Result<AudioListQuery> {
        let (offset, limit) = window(self.offset, self.limit)?;
        let order: OrderType = self
            .order_type
            .ok_or_else(|| ServerError::BadRequest("order_type is required".to_string()))?
            .parse()?;

        Ok(AudioListQuery {
            offset,
            limit,
            order,
        })
    }
}

/// GET /api/audio/
pub async fn list_audio(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiQuery(params): ApiQuery<AudioListParams>,
) -> Result<Json<AudioListPage>> {
    let query = params.into_query()?;
    let page = app_state.catalog.list(auth.user_id(), query).await?;
    Ok(Json(page))
}

/// POST /api/audio/
/// Multipart upload, the audio is read from the `file` field
pub async fn upload_audio(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    headers: HeaderMap,
    body: std::result::Result<Bytes, axum::extract::rejection::BytesRejection>,
) -> Result<Json<IdResponse>> {
    let body = body?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ServerError::BadRequest("Expected multipart/form-data".to_string()))?;

    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let constraints = multer::Constraints::new()
        .size_limit(multer::SizeLimit::new().whole_stream(MAX_UPLOAD_BYTES as u64));
    let mut multipart = multer::Multipart::with_constraints(stream, boundary, constraints);

    let mut file_data: Option<Bytes> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            file_data = Some(field.bytes().await?);
            break;
        }
    }

    let file_data =
        file_data.ok_or_else(|| ServerError::BadRequest("file field is required".to_string()))?;

    let blob_id = BlobId::generate();
    app_state
        .file_storage
        .store(&blob_id, &file_data[..])
        .await?;

    let id = match app_state.catalog.upload(auth.user_id(), blob_id).await {
        Ok(id) => id,
        Err(e) => {
            if let Err(cleanup) = app_state.file_storage.remove(&blob_id).await {
                tracing::warn!(blob = %blob_id, "failed to remove orphaned blob: {}", cleanup);
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        user_id = %auth.user_id(),
        audio_id = %id,
        size = file_data.len(),
        "audio uploaded"
    );

    Ok(Json(IdResponse { id: id.get() }))
}

/// PUT /api/audio/:id
pub async fn update_audio(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<UpdateAudio>,
) -> Result<Json<StatusResponse>> {
    update.validate()?;

    app_state
        .catalog
        .update_description(auth.user_id(), AudioId::new(id), update)
        .await?;

    Ok(Json(StatusResponse::ok()))
}

/// GET /api/audio/:id
/// Stream the stored file as an attachment named after the title
pub async fn download_audio(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response> {
    let audio = app_state
        .catalog
        .download(auth.user_id(), AudioId::new(id))
        .await?;

    let (file, size) = app_state.file_storage.open(&audio.blob_id).await?;

    let disposition = HeaderValue::from_str(&content_disposition(&audio.title))
        .map_err(|e| ServerError::Internal(format!("invalid Content-Disposition: {e}")))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, size)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| ServerError::Internal(e.to_string()))
}

/// `attachment; filename="<title>.aac"` with header-breaking characters replaced
fn content_disposition(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    format!("attachment; filename=\"{name}.{AAC_EXTENSION}\"")
}
