//! Weather lookup tool definition.
//!
//! Calls the companion weather API (`GET /api/weather?city=<name>`) and
//! renders its report as one text block. The service contract: 200 with
//! `{city, temperature, description}`, or a non-200 status with
//! `{error: <message>}`.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::config::Config;
use crate::core::{Error, Result};
use crate::domains::tools::{
    ToolDefinition, ToolHandler, ToolOutcome, ToolSchema, parse_arguments,
};

/// Parameters for the weather lookup tool.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherParams {
    /// City to look up.
    pub city: String,
}

/// Successful weather API response body.
#[derive(Debug, Deserialize)]
struct WeatherReport {
    city: String,
    temperature: String,
    description: String,
}

/// Error body the weather API sends with non-200 statuses.
#[derive(Debug, Deserialize)]
struct WeatherApiError {
    error: String,
}

/// Weather lookup tool - fetches current conditions for a city.
pub struct WeatherTool {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getWeatherByCity";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get weather by city name";

    pub fn new(config: &Config) -> Result<Self> {
        // The request timeout is this handler's own upper bound; the
        // dispatch engine enforces a second, coarser one.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.weather.request_timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Declared parameter shape: a required `city` string.
    pub fn schema() -> ToolSchema {
        ToolSchema::empty().required_string("city", "City name to look up")
    }

    /// Create the registry definition for this tool.
    pub fn definition(config: &Config) -> Result<ToolDefinition> {
        Ok(ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            Arc::new(Self::new(config)?),
        ))
    }

    async fn lookup(&self, city: &str) -> anyhow::Result<ToolOutcome> {
        let url = format!("{}/api/weather", self.base_url);
        debug!(%url, city, "querying weather service");

        let response = match self.client.get(&url).query(&[("city", city)]).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "weather service unreachable");
                return Ok(ToolOutcome::failure("failed to reach the weather service"));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<WeatherApiError>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("weather service returned {status}"));
            return Ok(ToolOutcome::failure(format!("Error: {message}")));
        }

        // A 200 with an undecodable body is a fault, not a report; let the
        // dispatch boundary turn it into a generic failure.
        let report: WeatherReport = response.json().await?;
        Ok(ToolOutcome::text(format!(
            "Weather in {}: {}, {}°C",
            report.city, report.description, report.temperature
        )))
    }
}

#[async_trait::async_trait]
impl ToolHandler for WeatherTool {
    async fn call(&self, arguments: Map<String, Value>) -> anyhow::Result<ToolOutcome> {
        let params: WeatherParams = parse_arguments(arguments)?;
        self.lookup(&params.city).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool_against(base_url: &str) -> WeatherTool {
        let mut config = Config::default();
        config.weather.base_url = base_url.to_string();
        config.weather.request_timeout_secs = 2;
        WeatherTool::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_service_is_failure_not_fault() {
        // Nothing listens on this port; the fetch error must be mapped, not
        // propagated.
        let tool = tool_against("http://127.0.0.1:9");
        let mut arguments = Map::new();
        arguments.insert("city".to_string(), json!("Nowhere"));

        let outcome = tool.call(arguments).await.unwrap();
        assert_eq!(
            outcome,
            ToolOutcome::failure("failed to reach the weather service")
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let tool = tool_against("http://127.0.0.1:4000/");
        assert_eq!(tool.base_url, "http://127.0.0.1:4000");
    }

    #[test]
    fn test_schema_requires_city() {
        let schema = WeatherTool::schema();
        assert!(schema.validate(&json!({})).is_err());
        assert!(schema.validate(&json!({ "city": "Paris" })).is_ok());
    }
}
