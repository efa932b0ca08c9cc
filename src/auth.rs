use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::Config;

/// Login form fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role (only "admin" is issued)
    pub role: String,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
}

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    /// Token is missing
    MissingToken,
    /// Token is invalid or expired
    InvalidToken,
    /// Wrong credentials
    Unauthorized,
    /// Some other error
    Other(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => {
                Redirect::to("/login").into_response()
            }
            AuthError::Unauthorized => (StatusCode::FORBIDDEN, "Not authorized").into_response(),
            AuthError::Other(err) => {
                error!("Auth error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Authenticated-request extension inserted by the middleware
#[derive(Debug, Clone)]
pub struct JwtAuth {
    pub claims: Claims,
}

/// Issues and validates the auth tokens for the single admin account
pub struct AuthService {
    admin_username: String,
    admin_password: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_minutes: i64,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_expiry_minutes: config.token_expiry_minutes,
        }
    }

    /// Check credentials and hand out a fresh token
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if username == self.admin_username && password == self.admin_password {
            self.generate_token(username)
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    fn generate_token(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            role: "admin".to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::minutes(self.token_expiry_minutes)).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Other(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Extract the auth token from the cookie or the Authorization header
pub fn extract_token(parts: &Parts) -> Result<String, AuthError> {
    // First check for token in cookies
    if let Some(cookie) = parts.headers.get(header::COOKIE) {
        let cookie_str = cookie.to_str().map_err(|_| AuthError::InvalidToken)?;
        for pair in cookie_str.split(';') {
            let mut kv = pair.trim().split('=');
            if let (Some("auth_token"), Some(value)) = (kv.next(), kv.next()) {
                return Ok(value.to_string());
            }
        }
    }

    // Fall back to a bearer header
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        let value = auth_header.to_str().map_err(|_| AuthError::InvalidToken)?;
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Ok(token.to_string());
        }
    }

    Err(AuthError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 3000,
            admin_username: "admin".to_string(),
            admin_password: "hunter2".to_string(),
            jwt_secret: "test_secret".to_string(),
            token_expiry_minutes: 60,
            max_upload_bytes: 1024,
        }
    }

    #[test]
    fn test_authenticate_round_trip() {
        let service = AuthService::new(&test_config());

        let token = service.authenticate("admin", "hunter2").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_credentials_rejected() {
        let service = AuthService::new(&test_config());

        assert!(matches!(
            service.authenticate("admin", "wrong"),
            Err(AuthError::Unauthorized)
        ));
        assert!(matches!(
            service.authenticate("intruder", "hunter2"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = AuthService::new(&test_config());

        assert!(matches!(
            service.validate_token("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
