//! HTTP routes. Validates request shape and renders whatever the dispatcher returns.

use crate::config::Config;
use crate::dispatcher::{BackendStatus, Dispatcher, TranslationRequest, TranslationResult};
use crate::error::TranslateError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

pub struct AppState {
    pub dispatcher: Dispatcher,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    backends: BackendStatus,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
    error: &'static str,
}

/// Error returned from handlers
pub enum ApiError {
    Validation(String),
    Translate(TranslateError),
}

impl From<TranslateError> for ApiError {
    fn from(e: TranslateError) -> Self {
        ApiError::Translate(e)
    }
}

/// HTTP status for each failure kind
pub fn status_for(error: &TranslateError) -> StatusCode {
    match error {
        TranslateError::ModelNotFound { .. } => StatusCode::BAD_REQUEST,
        TranslateError::AdapterNotConfigured { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        TranslateError::BackendUnreachable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        TranslateError::BackendRejected { .. } => StatusCode::NOT_FOUND,
        TranslateError::BackendUnauthorized { .. } => StatusCode::UNAUTHORIZED,
        TranslateError::BackendTranslationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    detail,
                    error: "validation_error",
                },
            ),
            ApiError::Translate(e) => {
                let status = status_for(&e);
                if status.is_server_error() {
                    error!("Translation failed: {}", e);
                } else {
                    warn!("Translation request rejected: {}", e);
                }
                (
                    status,
                    ErrorResponse {
                        detail: e.to_string(),
                        error: e.kind(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router with CORS and request tracing
pub fn router(state: Arc<AppState>, config: &Config) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/models", get(list_models))
        .route("/api/translate", post(translate))
        .route("/health", get(health_check))
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| {
            // A wildcard cannot be combined with credentials
            let wildcard = origin.as_str() == "*";
            if wildcard {
                warn!("Ignoring wildcard CORS origin");
            }
            !wildcard
        })
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Translation API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "models": "/api/models",
            "translate": "/api/translate",
            "health": "/health",
        },
    }))
}

async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    let models = state
        .dispatcher
        .models()
        .iter()
        .map(|model| ModelInfo {
            id: model.id.to_string(),
            name: model.display_name.to_string(),
            description: model.description.to_string(),
        })
        .collect();

    Json(ModelsResponse { models })
}

async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    if request.text.is_empty() {
        return Err(ApiError::Validation(
            "text must contain at least 1 character".to_string(),
        ));
    }

    let result = state.dispatcher.translate(&request).await?;
    Ok(Json(result))
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        backends: state.dispatcher.backend_status(),
    })
}
