/// Server error types
use audioshare_core::AudioShareError;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Domain(#[from] AudioShareError),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Multipart(#[from] multer::Error),

    #[error("{0}")]
    Body(#[from] BytesRejection),
}

impl From<audioshare_storage::StorageError> for ServerError {
    fn from(err: audioshare_storage::StorageError) -> Self {
        ServerError::Domain(err.into())
    }
}

fn domain_status(err: &AudioShareError) -> StatusCode {
    match err {
        AudioShareError::DuplicateUser
        | AudioShareError::ShareTargetNotFound
        | AudioShareError::SelfShare
        | AudioShareError::EmptyUpdate
        | AudioShareError::UnknownOrderType(_)
        | AudioShareError::InvalidInput(_)
        | AudioShareError::NotSupportedFormat => StatusCode::BAD_REQUEST,
        AudioShareError::InvalidCredentials | AudioShareError::InvalidRefreshToken => {
            StatusCode::UNAUTHORIZED
        }
        AudioShareError::AudioNotFound
        | AudioShareError::NotOwner
        | AudioShareError::BlobNotFound(_) => StatusCode::NOT_FOUND,
        AudioShareError::ShareExists => StatusCode::CONFLICT,
        AudioShareError::PasswordHash(_)
        | AudioShareError::Database(_)
        | AudioShareError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Domain(e) => domain_status(e),
            ServerError::Auth(_) | ServerError::Jwt(_) => StatusCode::UNAUTHORIZED,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Multipart(
                multer::Error::StreamSizeExceeded { .. } | multer::Error::FieldSizeExceeded { .. },
            ) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Multipart(_) => StatusCode::BAD_REQUEST,
            ServerError::Body(e) => e.status(),
            ServerError::Internal(_) | ServerError::Config(_) | ServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            _ if status.is_server_error() => {
                tracing::error!("{:?}", self);
                "internal server error".to_string()
            }
            ServerError::Jwt(e) => {
                tracing::warn!("Token rejected: {}", e);
                "invalid token".to_string()
            }
            ServerError::Body(e) => e.body_text(),
            _ => self.to_string(),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_status_mapping() {
        let cases = [
            (AudioShareError::DuplicateUser, StatusCode::BAD_REQUEST),
            (AudioShareError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AudioShareError::InvalidRefreshToken, StatusCode::UNAUTHORIZED),
            (AudioShareError::NotOwner, StatusCode::NOT_FOUND),
            (AudioShareError::AudioNotFound, StatusCode::NOT_FOUND),
            (AudioShareError::ShareExists, StatusCode::CONFLICT),
            (AudioShareError::SelfShare, StatusCode::BAD_REQUEST),
            (AudioShareError::NotSupportedFormat, StatusCode::BAD_REQUEST),
            (
                AudioShareError::database("disk I/O error"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status(), status);
        }
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let response = ServerError::Domain(AudioShareError::database("secret table name"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "internal server error");
    }

    #[tokio::test]
    async fn test_client_errors_carry_message() {
        let response = ServerError::Domain(AudioShareError::DuplicateUser).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "user exists");
    }
}
