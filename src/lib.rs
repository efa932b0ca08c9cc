pub mod archive;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod processor;

use std::sync::Arc;

use auth::AuthService;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// Auth service for JWT operations
    pub auth: Arc<AuthService>,
}
