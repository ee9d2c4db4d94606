/// Authentication service - access tokens and rotating refresh tokens
use crate::error::{Result, ServerError};
use audioshare_core::{types::UserId, RefreshTokenStore};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Shortest accepted signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

pub struct AuthService {
    secret: Vec<u8>,
    tokens: Arc<dyn RefreshTokenStore>,
    access_token_expiration: Duration,
    refresh_token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub token_type: TokenType,
}

/// Only access tokens are JWTs; refresh tokens are opaque and stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
}

/// Access and refresh token handed out on sign-in and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(
        secret: impl Into<Vec<u8>>,
        tokens: Arc<dyn RefreshTokenStore>,
        access_token_expiration: Duration,
        refresh_token_expiration: Duration,
    ) -> Result<Self> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ServerError::Config(format!(
                "secret key must be at least {MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self {
            secret,
            tokens,
            access_token_expiration,
            refresh_token_expiration,
        })
    }

    /// Create a signed access token
    pub fn create_access_token(&self, user_id: UserId) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.access_token_expiration;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: TokenType::Access,
        };

        let encoding_key = EncodingKey::from_secret(&self.secret);
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify signature and expiry of an access token
    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        let decoding_key = DecodingKey::from_secret(&self.secret);
        let validation = Validation::new(Algorithm::HS256);

        let claims = decode::<Claims>(token, &decoding_key, &validation)?.claims;
        claims
            .sub
            .parse()
            .map_err(|_| ServerError::Auth("invalid token subject".to_string()))
    }

    /// Generate a refresh token and make it the user's only live one
    pub async fn issue_refresh_token(&self, user_id: UserId) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.refresh_token_expiration;

        self.tokens
            .set_refresh_token(user_id, &token, expires_at)
            .await?;

        Ok(token)
    }

    /// Exchange a live refresh token for a new one
    ///
    /// The presented token stops being valid once this returns.
    pub async fn rotate_refresh_token(&self, old_token: &str) -> Result<(UserId, String)> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.refresh_token_expiration;

        let user_id = self
            .tokens
            .rotate_refresh_token(old_token, &token, expires_at)
            .await?;

        Ok((user_id, token))
    }

    /// Fresh access token plus a refresh token replacing any earlier one
    pub async fn issue_session(&self, user_id: UserId) -> Result<TokenPair> {
        Ok(TokenPair {
            token: self.create_access_token(user_id)?,
            refresh_token: self.issue_refresh_token(user_id).await?,
        })
    }

    /// Rotate the refresh token and sign a new access token for its owner
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair> {
        let (user_id, refresh_token) = self.rotate_refresh_token(refresh_token).await?;
        tracing::debug!(%user_id, "refresh token rotated");

        Ok(TokenPair {
            token: self.create_access_token(user_id)?,
            refresh_token,
        })
    }
}
