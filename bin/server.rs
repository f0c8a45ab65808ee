// Saju Engine - Web Server
// JSON API over the chart engines with Axum

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use saju_engine::{
    BirthInput, CalendarConverter, CycleEngine, SajuAnalyzer, SajuConfig, SajuError, Stem,
    VERSION,
};

type Analyzer = SajuAnalyzer<Box<dyn CalendarConverter>>;

/// Shared application state
#[derive(Clone)]
struct AppState {
    analyzer: Arc<Analyzer>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// POST /api/analyze body
#[derive(Deserialize)]
struct AnalyzeRequest {
    #[serde(flatten)]
    input: BirthInput,
    reference_year: Option<i32>,
    age: Option<i32>,
}

#[derive(Deserialize)]
struct YearQuery {
    day_master: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

fn error_response(e: SajuError) -> Response {
    let status = if e.is_conversion_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::BAD_REQUEST
    };
    warn!(error = %e, %status, "request rejected");
    (status, Json(ApiResponse::<()>::err(e.to_string()))).into_response()
}

fn this_year() -> i32 {
    Local::now().year()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        version: VERSION,
    }))
}

/// POST /api/analyze - Full chart for one birth
async fn analyze(State(state): State<AppState>, Json(request): Json<AnalyzeRequest>) -> Response {
    let reference_year = request.reference_year.unwrap_or_else(this_year);

    match state.analyzer.analyze(&request.input, reference_year, request.age) {
        Ok(analysis) => (StatusCode::OK, Json(ApiResponse::ok(analysis))).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/year/:year - Annual pillar, with a reading when `?day_master=` is given
async fn year_pillar(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(query): Query<YearQuery>,
) -> Response {
    let day_master = match query.day_master.as_deref().map(str::parse::<Stem>).transpose() {
        Ok(stem) => stem,
        Err(e) => return error_response(e),
    };

    let lookup = state.analyzer.year_lookup(year, day_master);
    (StatusCode::OK, Json(ApiResponse::ok(lookup))).into_response()
}

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        .route("/year/:year", get(year_pillar))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    println!("🌐 Saju Engine - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = SajuConfig::from_env()?;
    let calendar = config.calendar()?;
    if config.lunar_table.is_none() {
        info!("no lunar table configured; lunar input will be rejected");
    }

    let state = AppState {
        analyzer: Arc::new(SajuAnalyzer::with_cycle_engine(
            calendar,
            CycleEngine::with_cycle_count(config.cycle_count),
        )),
    };

    let addr = config.server.bind.as_str();
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!(%addr, error = %e, "failed to bind");
        anyhow::anyhow!("Failed to bind to {}: {}", addr, e)
    })?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/analyze", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
