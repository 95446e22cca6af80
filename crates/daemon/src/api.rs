use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::CACHE_CONTROL, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use statusboard_core::ErrorBody;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::aggregator::{collect_snapshot, StatusSource};

/// Message sent to clients when the snapshot could not be produced.
pub const STATUS_ERROR_MESSAGE: &str = "Failed to fetch project status";

#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn StatusSource>,
    cache_max_age_seconds: Option<u64>,
}

impl AppState {
    pub fn new(source: Arc<dyn StatusSource>, cache_max_age_seconds: Option<u64>) -> Self {
        Self {
            source,
            cache_max_age_seconds,
        }
    }
}

pub fn router(state: AppState, allow_origin: Option<HeaderValue>) -> Router {
    let mut app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/app-status", get(app_status))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = allow_origin {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET]),
        );
    }
    app
}

async fn healthz() -> &'static str {
    "ok"
}

/// Builds a fresh snapshot per request.
///
/// Aggregation runs on its own task so that a panic inside a provider client
/// becomes a 500 instead of a dropped connection.
async fn app_status(State(st): State<AppState>) -> Result<Response, AppError> {
    let source = Arc::clone(&st.source);
    let snapshot = tokio::spawn(async move { collect_snapshot(source.as_ref()).await }).await?;

    let mut resp = Json(snapshot).into_response();
    if let Some(age) = st.cache_max_age_seconds {
        let value = HeaderValue::from_str(&format!("public, max-age={age}"))?;
        resp.headers_mut().insert(CACHE_CONTROL, value);
    }
    Ok(resp)
}

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "error fetching project status");
        let body = Json(ErrorBody {
            error: STATUS_ERROR_MESSAGE.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
