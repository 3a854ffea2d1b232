//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (with dotenv support) or defaults. Configuration is
//! read once at startup, before the transport opens.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Fallback display name when `SERVER_NAME` is not set.
const DEFAULT_DISPLAY_NAME: &str = "No server name set";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tool dispatch configuration.
    pub tools: ToolsConfig,

    /// Weather data service configuration.
    pub weather: WeatherConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients during initialize.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Human-readable display name surfaced by the `getServerName` tool.
    /// Read from `SERVER_NAME` at startup; a fixed default otherwise.
    pub display_name: String,
}

/// Configuration for the tool dispatch engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Upper bound on a single tool invocation, in seconds.
    pub timeout_secs: u64,
}

/// Configuration for the external weather data service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the weather API the `getWeatherByCity` tool calls.
    pub base_url: String,

    /// Timeout for one outbound weather request, in seconds.
    pub request_timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "weather-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                display_name: DEFAULT_DISPLAY_NAME.to_string(),
            },
            tools: ToolsConfig { timeout_secs: 30 },
            weather: WeatherConfig {
                base_url: "http://127.0.0.1:4000".to_string(),
                request_timeout_secs: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// `SERVER_NAME` feeds the display name; server-internal settings use
    /// the `MCP_` prefix; the weather service uses `WEATHER_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(display_name) = std::env::var("SERVER_NAME") {
            config.server.display_name = display_name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(secs) = std::env::var("MCP_TOOL_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.tools.timeout_secs = secs;
            }
        }

        if let Ok(base_url) = std::env::var("WEATHER_API_URL") {
            config.weather.base_url = base_url;
        }

        if let Ok(secs) = std::env::var("WEATHER_HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.weather.request_timeout_secs = secs;
            }
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_display_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("SERVER_NAME", "staging-weather");
        }
        let config = Config::from_env();
        assert_eq!(config.server.display_name, "staging-weather");
        unsafe {
            std::env::remove_var("SERVER_NAME");
        }
    }

    #[test]
    fn test_display_name_default_fallback() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("SERVER_NAME");
        }
        let config = Config::from_env();
        assert_eq!(config.server.display_name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_weather_base_url_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("WEATHER_API_URL", "http://10.0.0.9:4100");
        }
        let config = Config::from_env();
        assert_eq!(config.weather.base_url, "http://10.0.0.9:4100");
        unsafe {
            std::env::remove_var("WEATHER_API_URL");
        }
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TOOL_TIMEOUT_SECS", "not-a-number");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.timeout_secs, 30);
        unsafe {
            std::env::remove_var("MCP_TOOL_TIMEOUT_SECS");
        }
    }
}
