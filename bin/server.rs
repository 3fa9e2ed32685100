// Visa Atlas - Web Server
// REST API for the map and the per-country pie chart

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use visa_atlas::{
    logging, AggregateQueryBuilder, CategoryTotal, Config, CountryTotal, FilterSpec, QueryError,
    SqliteStore,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    builder: Arc<AggregateQueryBuilder<SqliteStore>>,
}

/// Query string shared by both endpoints
#[derive(Debug, Default, Deserialize)]
struct StatsParams {
    year: Option<String>,
    quarter: Option<String>,
    status: Option<String>,
    exclude_groups: Option<String>,
}

impl StatsParams {
    fn to_filter(&self) -> FilterSpec {
        FilterSpec::from_params(
            self.year.as_deref(),
            self.quarter.as_deref(),
            self.status.as_deref(),
            self.exclude_groups.as_deref(),
        )
    }
}

/// Pie chart slice
#[derive(Serialize)]
struct VisaTypeResponse {
    visa_type: String,
    decisions: i64,
}

/// Map entry
#[derive(Serialize)]
struct MapEntryResponse {
    id: String,
    value: i64,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<CategoryTotal> for VisaTypeResponse {
    fn from(total: CategoryTotal) -> Self {
        Self {
            visa_type: total.category,
            decisions: total.total,
        }
    }
}

impl From<CountryTotal> for MapEntryResponse {
    fn from(total: CountryTotal) -> Self {
        Self {
            id: total.id,
            value: total.value,
        }
    }
}

/// Query errors mapped onto HTTP responses
struct ApiError(QueryError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            QueryError::MissingParameter(_) => (
                StatusCode::BAD_REQUEST,
                "Missing year, quarter, or status parameter".to_string(),
            ),
            QueryError::CountryNotFound(_) => {
                (StatusCode::NOT_FOUND, "Country not found".to_string())
            }
            QueryError::Store(e) => {
                error!("stats query failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

/// GET /api/pie_chart/:country_code - Visa type breakdown for one country
async fn get_pie_chart_data(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Vec<VisaTypeResponse>>, ApiError> {
    let filter = params.to_filter();
    let builder = state.builder.clone();

    let totals = tokio::task::spawn_blocking(move || {
        builder.single_country_breakdown(&country_code, &filter)
    })
    .await
    .map_err(|e| ApiError(QueryError::Store(e.into())))?
    .map_err(ApiError)?;

    Ok(Json(totals.into_iter().map(Into::into).collect()))
}

/// GET /api/map-data - Issued decisions per country for the heatmap
async fn get_map_data(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Vec<MapEntryResponse>>, ApiError> {
    let filter = params.to_filter();
    let builder = state.builder.clone();

    let totals = tokio::task::spawn_blocking(move || builder.global_rollup(&filter))
        .await
        .map_err(|e| ApiError(QueryError::Store(e.into())))?
        .map_err(ApiError)?;

    Ok(Json(totals.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = Config::from_env();

    if !config.database_path.exists() {
        error!(
            path = %config.database_path.display(),
            "database not found; run `visa-atlas import` first"
        );
        std::process::exit(1);
    }

    let store = SqliteStore::open(&config.database_path)?;
    info!(path = %config.database_path.display(), "database opened");

    // Create shared state
    let state = AppState {
        builder: Arc::new(AggregateQueryBuilder::new(store)),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/pie_chart/:country_code", get(get_pie_chart_data))
        .route("/map-data", get(get_map_data))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "server running");

    axum::serve(listener, app).await?;

    Ok(())
}
