//! Companion weather HTTP API.
//!
//! A small data-fetch service the MCP server's `getWeatherByCity` tool
//! calls. Serves `GET /api/weather?city=<name>` backed by wttr.in, plus a
//! health endpoint. Runs as its own process, typically next to the MCP
//! server on localhost.

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const WTTR_BASE: &str = "https://wttr.in/";

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    client: reqwest::Client,
    upstream: Url,
}

/// Query parameters for the weather endpoint.
#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

/// Successful weather response body.
#[derive(Debug, Serialize)]
struct WeatherReport {
    city: String,
    temperature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

/// wttr.in `format=j1` payload, narrowed to the fields we use.
#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCondition>,
}

#[derive(Debug, Deserialize)]
struct WttrCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrDescription>,
}

#[derive(Debug, Deserialize)]
struct WttrDescription {
    value: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let host = std::env::var("WEATHER_API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("WEATHER_API_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4000);
    let addr = format!("{host}:{port}");

    let state = AppState {
        client: reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?,
        upstream: Url::parse(WTTR_BASE)?,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/weather", get(get_weather))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Weather API running at http://{addr}");
    info!("  → Weather: GET /api/weather?city=<name>");
    info!("  → Health:  GET /health");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle `GET /api/weather?city=<name>`.
async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> impl IntoResponse {
    let city = match query.city.as_deref() {
        Some(city) if !city.is_empty() => city.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiError {
                    error: "City is required".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut url = state.upstream.clone();
    url.set_path(&city);
    url.query_pairs_mut().append_pair("format", "j1");

    let upstream: std::result::Result<WttrResponse, reqwest::Error> =
        match state.client.get(url).send().await {
            Ok(response) => response.json().await,
            Err(e) => Err(e),
        };

    let data = match upstream {
        Ok(data) => data,
        Err(e) => {
            warn!(city = %city, error = %e, "upstream weather fetch failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: "Failed to fetch weather data".to_string(),
                }),
            )
                .into_response();
        }
    };

    let Some(current) = data.current_condition.into_iter().next() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "Weather data not found".to_string(),
            }),
        )
            .into_response();
    };

    let report = WeatherReport {
        city,
        temperature: current.temp_c,
        description: current.weather_desc.into_iter().next().map(|d| d.value),
    };

    (StatusCode::OK, Json(report)).into_response()
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Initialize the logging subsystem.
fn init_logging() {
    let level = match std::env::var("MCP_LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
