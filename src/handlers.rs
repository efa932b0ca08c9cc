use axum::extract::{Extension, Multipart, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use bytes::Bytes;
use serde_json::json;
use tracing::{error, info};

use crate::archive;
use crate::auth::{AuthError, Credentials, JwtAuth};
use crate::processor;
use crate::AppState;

/// Login error keys we are willing to echo back into the page
const LOGIN_ERRORS: [(&str, &str); 2] = [
    ("credentials", "Invalid username or password"),
    ("internal", "Authentication error occurred, please try again"),
];

/// Handler for the landing page
pub async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../assets/index.html"))
}

/// Handler for the login form page
pub async fn login_form_handler(uri: Uri) -> impl IntoResponse {
    // Only a known error key renders a message; anything else shows a clean form
    let key = uri.query().and_then(|query| query.strip_prefix("error="));
    let message = LOGIN_ERRORS
        .iter()
        .find(|(known, _)| Some(*known) == key)
        .map(|(_, message)| *message);

    let html = include_str!("../assets/login.html");
    let html = match message {
        Some(message) => html.replace(
            "<!-- ERROR_MESSAGE -->",
            &format!("<p class=\"error\">{}</p>", message),
        ),
        None => html.to_string(),
    };

    Html(html)
}

/// Handler for login form submission
pub async fn login_handler(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Response {
    match state
        .auth
        .authenticate(&credentials.username, &credentials.password)
    {
        Ok(token) => {
            info!("User {} successfully authenticated", credentials.username);
            let cookie = format!("auth_token={}; Path=/; HttpOnly; SameSite=Strict", token);
            let mut response = Redirect::to("/upload").into_response();
            response.headers_mut().insert(
                header::SET_COOKIE,
                header::HeaderValue::from_str(&cookie).unwrap(),
            );
            response
        }
        Err(AuthError::Unauthorized) => {
            error!("Failed login attempt for user: {}", credentials.username);
            login_retry_response("credentials")
        }
        Err(err) => {
            error!("Authentication error: {:?}", err);
            login_retry_response("internal")
        }
    }
}

/// Redirect back to the login form with an error key and a cleared cookie
fn login_retry_response(error_key: &str) -> Response {
    let mut response = Redirect::to(&format!("/login?error={}", error_key)).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        header::HeaderValue::from_static("auth_token=; Path=/; HttpOnly; Max-Age=0"),
    );
    response
}

/// Handler for the upload form page
pub async fn upload_form_handler(Extension(_auth): Extension<JwtAuth>) -> impl IntoResponse {
    Html(include_str!("../assets/upload.html"))
}

/// Handler for spreadsheet uploads
///
/// Processes the workbook start to finish and answers with the ZIP of
/// per-rota CSVs, or a 422 carrying the structural error when the whole
/// upload is rejected. There is never partial output.
pub async fn upload_handler(
    Extension(auth): Extension<JwtAuth>,
    mut multipart: Multipart,
) -> Result<Response, StatusCode> {
    let mut workbook: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("workbook") {
            workbook = Some(field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?);
        }
    }

    let Some(data) = workbook else {
        error!("Upload request without a workbook field");
        return Err(StatusCode::BAD_REQUEST);
    };

    let result = match processor::process_workbook(&data) {
        Ok(result) => result,
        Err(e) => {
            error!("Upload rejected: {}", e);
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response());
        }
    };

    let bundle = match archive::bundle(&result) {
        Ok(bundle) => bundle,
        Err(e) => {
            error!("Failed to bundle outputs: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    info!(
        "Processed {} rota groups for {}",
        result.outputs.len(),
        auth.claims.sub
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"processed_shifts.zip\"",
            ),
        ],
        bundle,
    )
        .into_response())
}

// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}
