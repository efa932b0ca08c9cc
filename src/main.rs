use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rotahours::auth::{self, AuthService};
use rotahours::config::Config;
use rotahours::error::Error;
use rotahours::handlers::{
    health_handler, index_handler, login_form_handler, login_handler, upload_form_handler,
    upload_handler,
};
use rotahours::AppState;

#[tokio::main]
async fn main() -> miette::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting rota hours server");

    let config = Config::load()?;
    info!("Accepting logins for user {}", config.admin_username);

    let auth_service = Arc::new(AuthService::new(&config));
    let state = AppState {
        auth: auth_service.clone(),
    };

    // Authentication middleware
    async fn auth_middleware(
        req: Request<Body>,
        next: Next,
        auth_service: Arc<AuthService>,
    ) -> Result<Response, Response> {
        // Public routes are always allowed
        let path = req.uri().path();
        if path == "/" || path == "/login" || path.starts_with("/assets") || path == "/health" {
            return Ok(next.run(req).await);
        }

        let (parts, body) = req.into_parts();

        match auth::extract_token(&parts) {
            Ok(token) => match auth_service.validate_token(&token) {
                Ok(claims) => {
                    let auth = auth::JwtAuth { claims };

                    // Reconstruct the request with auth data attached
                    let mut req = Request::from_parts(parts, body);
                    req.extensions_mut().insert(auth);

                    Ok(next.run(req).await)
                }
                Err(err) => Err(err.into_response()),
            },
            Err(err) => Err(err.into_response()),
        }
    }

    let auth_service_for_middleware = auth_service.clone();
    let auth_middleware = move |req: Request<Body>, next: Next| {
        auth_middleware(req, next, auth_service_for_middleware.clone())
    };

    // Build the router
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/login", get(login_form_handler).post(login_handler))
        .route("/health", get(health_handler))
        .route("/upload", get(upload_form_handler).post(upload_handler))
        // Apply auth middleware
        .layer(axum::middleware::from_fn(auth_middleware))
        // Serve static files
        .nest_service("/assets", ServeDir::new("assets"))
        // Other middlewares
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(Error::from)?;
    axum::serve(listener, app).await.map_err(Error::from)?;

    Ok(())
}
