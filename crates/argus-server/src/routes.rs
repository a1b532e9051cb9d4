use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use url::Url;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use argus_core::screen::notify_applicant;

use crate::dto::{ErrorResponse, HealthResponse, ScreenRequest, ScreenResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/screen", post(screen))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/v1/screen",
    request_body = ScreenRequest,
    responses(
        (status = 200, description = "Screening decision", body = ScreenResponse),
        (status = 400, description = "Invalid URL", body = ErrorResponse),
        (status = 502, description = "Website could not be fetched", body = ErrorResponse),
    ),
    tag = "screen"
)]
pub async fn screen(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ScreenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !is_screenable_url(&body.url) {
        let response = ErrorResponse {
            error: "invalid_url".to_string(),
            message: "Please enter a valid URL.".to_string(),
        };
        return Ok((StatusCode::BAD_REQUEST, axum::Json(response)).into_response());
    }

    let screening = state.pipeline.screen(&body.url).await?;

    // Dispatch failures are reported in the response, never as request errors.
    let email_status = match body.notify_email.as_deref() {
        Some(to) => Some(match &state.mailer {
            Some(mailer) => notify_applicant(mailer, to, &screening).await,
            None => "Error sending email: no SMTP relay configured".to_string(),
        }),
        None => None,
    };

    let response = ScreenResponse::new(body.url, screening, email_status);
    Ok(axum::Json(response).into_response())
}

/// A screenable URL: parseable and reachable over http(s).
fn is_screenable_url(raw: &str) -> bool {
    match Url::parse(raw.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy",
        mailer: if state.mailer.is_some() {
            "configured"
        } else {
            "disabled"
        },
    };

    (StatusCode::OK, axum::Json(response))
}
