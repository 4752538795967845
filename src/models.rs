use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherRequest {
    #[schemars(description = "Name of the city to report the current weather for")]
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetIpDetailsRequest {
    #[schemars(description = "IPv4/IPv6 address to look up, or \"me\" for the caller's own address")]
    pub ip_addr: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct WebSearchRequest {
    #[schemars(description = "Search query to send to Google Custom Search")]
    pub query: String,
    #[schemars(description = "Number of results to return, clamped to 1..=10 (defaults to 5)")]
    pub num: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct MakeRequestRequest {
    #[schemars(description = "Target URL, e.g. https://api.example.com/data")]
    pub url: String,
    #[schemars(description = "HTTP method to use (GET, POST, PUT, ...), case-insensitive")]
    pub method: String,
    #[schemars(description = "Optional request parameters: headers and body")]
    pub params: Option<FetchParams>,
}

/// Optional knobs for the generic request tool.
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct FetchParams {
    pub headers: Option<HashMap<String, String>>,
    /// Request body. A JSON string is sent byte-for-byte; any other JSON
    /// value is serialized to its compact text form first.
    pub body: Option<Value>,
}

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

// Only the fields the weather report uses, all optional so a shape change
// upstream degrades into a missing-field error instead of a parse failure.

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: Option<WeatherMain>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherMain {
    /// Kept as a raw JSON number so the report prints it verbatim.
    pub temp: Option<serde_json::Number>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub description: Option<String>,
}
