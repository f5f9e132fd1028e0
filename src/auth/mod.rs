//! Identity provider: password hashes and signed session tokens.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{SecurityConfig, MAX_SESSION_EXPIRY_HOURS};
use crate::database::models::user::User;

pub mod cookie;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn for_user(user: &User, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = expiry_hours.clamp(1, MAX_SESSION_EXPIRY_HOURS) as i64;
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Authenticated browser identity decoded from a valid token
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub expires: DateTime<Utc>,
}

impl Session {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            expires: Utc
                .timestamp_opt(claims.exp, 0)
                .single()
                .unwrap_or_else(Utc::now),
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session secret not configured")]
    MissingSecret,

    #[error("Session token generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

/// Sign a session token for the user
pub fn issue_session_token(user: &User, security: &SecurityConfig) -> Result<String, AuthError> {
    let secret = &security.session_secret;

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let claims = Claims::for_user(user, security.session_lifetime_hours());
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify the signature and expiry of a session token
pub fn validate_session_token(token: &str, security: &SecurityConfig) -> Result<Session, AuthError> {
    let secret = &security.session_secret;

    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims.into())
}

/// Hash a password with bcrypt; runs on the blocking pool
pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Compare a password with a stored bcrypt hash; runs on the blocking pool
pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}
