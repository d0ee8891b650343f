use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use vidintel_core::AppConfig;
use vidintel_engine::{analyze_topic, reorder, AnalysisConfig, SortOrder};
use vidintel_youtube::YoutubeClient;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<YoutubeClient>,
    pub config: Arc<AppConfig>,
    pub analysis: Arc<AnalysisConfig>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/intel", get(get_intel))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                )),
        )
        .with_state(state)
}

#[must_use]
pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

#[derive(Debug, Deserialize)]
struct IntelQuery {
    topic: Option<String>,
    sort: Option<String>,
}

/// `GET /api/v1/intel?topic=…[&sort=velocity|engagement|trending]`
///
/// Validates the topic at the boundary, fetches the merged batch from the
/// upstream client, runs the engine, and applies the requested presentation
/// ordering to the market data.
async fn get_intel(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<IntelQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let topic = query
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                "topic must be a non-empty string",
            )
        })?;

    let sort = match query.sort.as_deref() {
        None => SortOrder::default(),
        Some(raw) => SortOrder::parse(raw).ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                "sort must be one of: velocity, engagement, trending",
            )
        })?,
    };

    let batch = state
        .client
        .fetch_topic_batch(
            topic,
            state.config.search_window_days,
            state.config.max_results,
        )
        .await
        .map_err(|e| {
            tracing::error!(topic, error = %e, "upstream retrieval failed");
            ApiError::new(req_id.0.clone(), "upstream_error", "video retrieval failed")
        })?;

    let analysis = analyze_topic(topic, &batch, &state.analysis).map_err(|e| {
        tracing::error!(topic, error = %e, "analysis failed");
        ApiError::new(req_id.0.clone(), "internal_error", "analysis failed")
    })?;

    let mut report = analysis.report;
    reorder(&mut report.market_data, sort);

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: report,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
