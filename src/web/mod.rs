//! Web API module for Mockframe.
//!
//! Thin translation layer between HTTP and the pure core: multipart uploads in,
//! JSON or PNG bytes out. Every core failure becomes a single-sentence
//! `{"detail": ...}` body with an appropriate status code.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /models` - Full device catalog, keyed by model name
//! - `POST /detect` - Detect the device model from an uploaded screenshot
//! - `POST /generate` - Compose a screenshot into a device frame, returns PNG

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::assets::frames::{FrameKey, FrameStore, Orientation};
use crate::catalog::models::{Catalog, DeviceModel, Series};
use crate::compose::compositor::{InsetConfig, compose};
use crate::detect::matcher::detect;
use crate::foundation::error::MockupError;

/// Per-file upload cap. Uploads beyond this are rejected with 413.
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

// Request bodies also carry multipart framing; leave headroom above the
// per-file cap so the cap check itself produces the JSON error shape.
const BODY_LIMIT_BYTES: usize = MAX_UPLOAD_BYTES * 2;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Device registry (immutable after construction).
    catalog: Arc<Catalog>,
    /// Frame asset source.
    frames: Arc<FrameStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(catalog: Catalog, frames: FrameStore) -> Self {
        Self {
            catalog: Arc::new(catalog),
            frames: Arc::new(frames),
        }
    }

    /// Returns the device registry.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "ok").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Catalog entries keyed by model name.
    pub models: BTreeMap<String, DeviceModel>,
}

/// Detection response.
#[derive(Debug, Serialize)]
pub struct DetectResponse {
    /// Best-matching model name.
    pub detected_model: String,
    /// Every plausible match, best first.
    pub all_matches: Vec<String>,
    /// Colorways of the detected model.
    pub colors: Vec<String>,
    /// Uploaded image resolution as `[width, height]`.
    pub resolution: (u32, u32),
    /// Generation of the detected model.
    pub series: Series,
}

/// Error body shared by all endpoints: one descriptive sentence.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub detail: String,
}

/// An error response: status code plus [`ErrorBody`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<MockupError> for ApiError {
    fn from(err: MockupError) -> Self {
        let status = match &err {
            MockupError::UnreadableImage(_)
            | MockupError::InvalidSelection(_)
            | MockupError::InvalidCatalog(_) => StatusCode::BAD_REQUEST,
            MockupError::FrameNotFound(_) => StatusCode::NOT_FOUND,
            MockupError::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            MockupError::InvalidFrame(_)
            | MockupError::InvalidViewport(_)
            | MockupError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "internal error while handling request");
        }
        Self::new(status, err.to_string())
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// Router
// ============================================================================

/// Build the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/models", get(list_models))
        .route("/detect", post(detect_model))
        .route("/generate", post(generate_mockup))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the API until the process is stopped.
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("mockframe API listening on {addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let models = state
        .catalog
        .iter()
        .map(|m| (m.name.clone(), m.clone()))
        .collect();
    Json(ModelsResponse { models })
}

async fn detect_model(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<DetectResponse>> {
    let upload = read_upload(multipart).await?;
    let file = upload
        .file
        .ok_or_else(|| ApiError::bad_request("missing file upload field 'file'"))?;

    let (width, height) = image_dimensions(&file)?;
    let detection = detect(&state.catalog, width, height, Series::newest());
    let Some(detected) = detection.model else {
        return Err(ApiError::bad_request(
            "could not detect an iPhone model; the screenshot does not match iPhone 16 or 17 series dimensions",
        ));
    };

    // The winner always comes from the catalog the matcher just walked.
    let model = state.catalog.get(&detected).ok_or_else(|| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "detected model missing from catalog",
        )
    })?;

    Ok(Json(DetectResponse {
        detected_model: detected,
        all_matches: detection.matches,
        colors: model.colors.clone(),
        resolution: (width, height),
        series: model.series,
    }))
}

async fn generate_mockup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Response> {
    let upload = read_upload(multipart).await?;
    let file = upload
        .file
        .ok_or_else(|| ApiError::bad_request("missing file upload field 'file'"))?;
    let color = upload
        .color
        .ok_or_else(|| ApiError::bad_request("color is required"))?;

    let model_name = match upload.model {
        Some(name) => name,
        None => {
            let (width, height) = image_dimensions(&file)?;
            detect(&state.catalog, width, height, Series::newest())
                .model
                .ok_or_else(|| {
                    ApiError::bad_request(
                        "could not detect an iPhone model; pass an explicit model instead",
                    )
                })?
        }
    };

    let model = state
        .catalog
        .get(&model_name)
        .ok_or_else(|| MockupError::invalid_selection(format!("unknown model '{model_name}'")))?;
    if !model.has_color(&color) {
        return Err(MockupError::invalid_selection(format!(
            "invalid color '{}' for {}; available: {}",
            color,
            model.name,
            model.colors.join(", ")
        ))
        .into());
    }

    let key = FrameKey {
        model: model.name.clone(),
        color,
        orientation: upload.orientation,
    };
    let frame_bytes = state
        .frames
        .load(&key)
        .await?
        .ok_or_else(|| MockupError::frame_not_found(key.to_string()))?;

    let png = compose(&frame_bytes, &file, &InsetConfig::default())?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", key.download_name()),
        ),
    ];
    Ok((headers, png).into_response())
}

// ============================================================================
// Multipart handling
// ============================================================================

#[derive(Debug, Default)]
struct Upload {
    file: Option<Vec<u8>>,
    model: Option<String>,
    color: Option<String>,
    orientation: Orientation,
}

/// Drain the multipart stream into an [`Upload`], enforcing the per-file cap.
async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    let mut upload = Upload::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(MockupError::upload_too_large(format!(
                    "upload exceeds the {} MiB limit",
                    MAX_UPLOAD_BYTES / (1024 * 1024)
                ))
                .into());
            }
            Err(e) => return Err(ApiError::bad_request(format!("malformed upload: {e}"))),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(MockupError::upload_too_large(format!(
                        "upload exceeds the {} MiB limit",
                        MAX_UPLOAD_BYTES / (1024 * 1024)
                    ))
                    .into());
                }
                upload.file = Some(bytes.to_vec());
            }
            "model" => {
                let text = read_text_field(field).await?;
                if !text.is_empty() {
                    upload.model = Some(text);
                }
            }
            "color" => {
                let text = read_text_field(field).await?;
                if !text.is_empty() {
                    upload.color = Some(text);
                }
            }
            "orientation" => {
                let text = read_text_field(field).await?;
                if !text.is_empty() {
                    upload.orientation = text.parse().map_err(ApiError::from)?;
                }
            }
            _ => {}
        }
    }

    Ok(upload)
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map(|s| s.trim().to_string())
        .map_err(|e| ApiError::bad_request(format!("malformed upload field: {e}")))
}

/// Read `(width, height)` from encoded image bytes without a full decode.
fn image_dimensions(bytes: &[u8]) -> ApiResult<(u32, u32)> {
    image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| MockupError::unreadable_image(format!("could not sniff image format: {e}")))?
        .into_dimensions()
        .map_err(|e| {
            MockupError::unreadable_image(format!("could not read image dimensions: {e}")).into()
        })
}
