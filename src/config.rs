use crate::error::{env_error, AppResult};
use dotenvy::dotenv;
use std::env;

/// Main configuration structure for the server
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the server listens on
    pub port: u16,
    /// Username accepted by the login form
    pub admin_username: String,
    /// Password accepted by the login form
    pub admin_password: String,
    /// Secret for signing/verifying auth tokens
    pub jwt_secret: String,
    /// Auth token lifetime in minutes
    pub token_expiry_minutes: i64,
    /// Upper bound on uploaded workbook size
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Secrets are required; everything else has a sensible default
        let admin_password =
            env::var("ADMIN_PASSWORD").map_err(|_| env_error("ADMIN_PASSWORD"))?;
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| env_error("JWT_SECRET"))?;

        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let token_expiry_minutes = env::var("TOKEN_EXPIRY_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(60 * 24);

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10 * 1024 * 1024);

        Ok(Config {
            port,
            admin_username,
            admin_password,
            jwt_secret,
            token_expiry_minutes,
            max_upload_bytes,
        })
    }
}
