use anyhow::Result;
use reqwest::{Client, Method};
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::cards;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::CapabilityError;
use crate::fallback::{FallbackHandler, ProxiedRequest, ProxiedResponse};
use crate::formatters::{format_current_weather, format_ip_details};
use crate::models::{
    CurrentWeatherResponse, FetchParams, GetIpDetailsRequest, GetWeatherRequest,
    MakeRequestRequest, WebSearchRequest,
};

/// Result count used when the caller leaves `num` unset.
const DEFAULT_RESULT_COUNT: i64 = 5;

/// Clamps the web-search result count to the provider's 1..=10 window.
pub fn clamp_result_count(num: Option<i64>) -> i64 {
    num.unwrap_or(DEFAULT_RESULT_COUNT).clamp(1, 10)
}

/// Edge toolbox service that handles MCP tool calls.
#[derive(Clone)]
pub struct EdgeTools {
    client: Arc<Client>,
    config: Arc<Config>,
    fallback: Option<Arc<dyn FallbackHandler>>,
    tool_router: ToolRouter<Self>,
}

impl EdgeTools {
    /// Creates the service around an immutable configuration.
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            fallback: None,
            tool_router: Self::tool_router(),
        })
    }

    /// Installs the handler that unmatched inbound requests are forwarded to.
    pub fn with_fallback(mut self, handler: Arc<dyn FallbackHandler>) -> Self {
        self.fallback = Some(handler);
        self
    }

    /// Forwards an unrecognized inbound request to the embedding
    /// environment's handler, verbatim.
    pub async fn forward_unmatched(&self, request: ProxiedRequest) -> ProxiedResponse {
        match &self.fallback {
            Some(handler) => handler.handle(request).await,
            None => ProxiedResponse::new(502, "no passthrough handler installed".as_bytes()),
        }
    }

    /// Makes an HTTP GET request and deserializes the JSON response.
    ///
    /// A non-success status captures the body text for the error message.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, CapabilityError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::UpstreamStatus { status, body });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetches the current weather for a city.
    pub async fn weather(&self, city: &str) -> Result<String, CapabilityError> {
        let url = format!(
            "{}/data/2.5/weather?q={}&appid={}&units=metric",
            self.config.bases.weather,
            urlencoding::encode(city),
            self.config.weather_api_key,
        );

        let current = self.get_json::<CurrentWeatherResponse>(&url).await?;

        let temp = current
            .main
            .and_then(|main| main.temp)
            .ok_or(CapabilityError::MissingField("main.temp"))?;
        let description = current
            .weather
            .into_iter()
            .next()
            .and_then(|condition| condition.description)
            .ok_or(CapabilityError::MissingField("weather[0].description"))?;

        Ok(format_current_weather(city, &temp, &description))
    }

    /// Fetches geolocation details for an IP address.
    ///
    /// The sentinel `"me"` omits the `ip` parameter so the provider
    /// resolves the caller's own address.
    pub async fn ip_details(&self, ip_addr: &str) -> Result<String, CapabilityError> {
        let url = if ip_addr == "me" {
            format!("{}/ipgeo?apiKey={}", self.config.bases.ip, self.config.ip_api_key)
        } else {
            format!(
                "{}/ipgeo?apiKey={}&ip={}",
                self.config.bases.ip,
                self.config.ip_api_key,
                urlencoding::encode(ip_addr),
            )
        };

        let details = self.get_json::<Map<String, Value>>(&url).await?;
        Ok(format_ip_details(&details))
    }

    /// Runs a Google Custom Search query and returns the full response as
    /// JSON text.
    pub async fn search(&self, query: &str, num: Option<i64>) -> Result<String, CapabilityError> {
        let count = clamp_result_count(num);
        let url = format!(
            "{}/customsearch/v1?key={}&cx={}&q={}&num={}",
            self.config.bases.search,
            self.config.search_api_key,
            self.config.search_cx,
            urlencoding::encode(query),
            count,
        );

        let results = self.get_json::<Value>(&url).await?;
        Ok(serde_json::to_string(&results)?)
    }

    /// Performs a caller-specified HTTP request and returns the raw
    /// response text.
    pub async fn request(
        &self,
        url: &str,
        method: &str,
        params: Option<FetchParams>,
    ) -> Result<String, CapabilityError> {
        let method = Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|_| CapabilityError::InvalidRequest(format!("invalid HTTP method: {}", method)))?;

        let params = params.unwrap_or_default();
        let mut request = self.client.request(method, url);

        if let Some(headers) = params.headers {
            for (name, value) in headers {
                request = request.header(&name, value);
            }
        }

        if let Some(body) = params.body {
            request = match body {
                Value::String(text) => request.body(text),
                other => request.body(serde_json::to_string(&other)?),
            };
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::UpstreamStatus { status, body });
        }

        Ok(response.text().await?)
    }
}

// ============================================================================
// Boundary flattening
// ============================================================================

// The tool contract predates this crate: every failure comes back as a
// prefixed plain string, phrased per capability. Flattening happens only
// here, never inside the capability functions.

fn reason(status: reqwest::StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

pub fn weather_error_text(err: &CapabilityError) -> String {
    let message = match err {
        CapabilityError::UpstreamStatus { .. } => "Weather data not found".to_string(),
        other => other.to_string(),
    };
    format!("Error fetching weather data: {}", message)
}

pub fn ip_error_text(err: &CapabilityError) -> String {
    let message = match err {
        CapabilityError::UpstreamStatus { .. } => "Failed to fetch IP".to_string(),
        other => other.to_string(),
    };
    format!("Error fetching IP: {}", message)
}

pub fn search_error_text(err: &CapabilityError) -> String {
    let message = match err {
        CapabilityError::UpstreamStatus { status, body } => {
            format!("Google API error: {} {} {}", status.as_u16(), reason(*status), body)
        }
        other => other.to_string(),
    };
    format!("Error fetching Google search results: {}", message)
}

pub fn request_error_text(err: &CapabilityError) -> String {
    let message = match err {
        // historical field order: status, body, then status text
        CapabilityError::UpstreamStatus { status, body } => {
            format!("Request failed: {} {} {}", status.as_u16(), body, reason(*status))
        }
        other => other.to_string(),
    };
    format!("Error making request: {}", message)
}

#[tool_handler]
impl ServerHandler for EdgeTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-edge-tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "An edge toolbox for tool-calling clients: current weather by city \
                name, IP geolocation details, Google web search, generic HTTP \
                requests, and a random playing card."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl EdgeTools {
    /// Reports the current weather for a city
    #[tool(description = "Get the current weather for a city by name, in metric units.")]
    async fn get_weather(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting weather for city: {}", request.city);

        let text = match self.weather(&request.city).await {
            Ok(report) => report,
            Err(err) => weather_error_text(&err),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Reports geolocation details for an IP address
    #[tool(description = "Get geolocation details for an IP address. Pass \"me\" to look up the caller's own address.")]
    async fn get_ip_details(
        &self,
        Parameters(request): Parameters<GetIpDetailsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting IP details for: {}", request.ip_addr);

        let text = match self.ip_details(&request.ip_addr).await {
            Ok(report) => report,
            Err(err) => ip_error_text(&err),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Runs a web search and returns the provider's raw JSON
    #[tool(description = "Perform a web search via Google Custom Search. Returns the provider's full JSON response as text; num is clamped to 1-10.")]
    async fn web_search(
        &self,
        Parameters(request): Parameters<WebSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Searching the web for: {}", request.query);

        let text = match self.search(&request.query, request.num).await {
            Ok(results) => results,
            Err(err) => search_error_text(&err),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Performs an arbitrary HTTP request
    #[tool(description = "Make a generic HTTP request to any URL with a chosen method and optional headers and body. Returns the raw response text.")]
    async fn make_request(
        &self,
        Parameters(request): Parameters<MakeRequestRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Requesting {} {}", request.method, request.url);

        let text = match self.request(&request.url, &request.method, request.params).await {
            Ok(body) => body,
            Err(err) => request_error_text(&err),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Draws a random playing card
    #[tool(description = "Draw one card from a standard 52-card deck, uniformly at random.")]
    async fn random_card(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(cards::random_card())]))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn result_count_clamps_into_provider_window() {
        assert_eq!(clamp_result_count(Some(0)), 1);
        assert_eq!(clamp_result_count(Some(-3)), 1);
        assert_eq!(clamp_result_count(Some(15)), 10);
        assert_eq!(clamp_result_count(Some(7)), 7);
        assert_eq!(clamp_result_count(None), 5);
    }

    #[test]
    fn weather_status_failures_keep_the_legacy_message() {
        let err = CapabilityError::UpstreamStatus {
            status: StatusCode::NOT_FOUND,
            body: "city not found".to_string(),
        };
        assert_eq!(
            weather_error_text(&err),
            "Error fetching weather data: Weather data not found"
        );
    }

    #[test]
    fn weather_missing_fields_use_the_same_prefix() {
        let err = CapabilityError::MissingField("main.temp");
        assert_eq!(
            weather_error_text(&err),
            "Error fetching weather data: missing field: main.temp"
        );
    }

    #[test]
    fn ip_status_failures_keep_the_legacy_message() {
        let err = CapabilityError::UpstreamStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert_eq!(ip_error_text(&err), "Error fetching IP: Failed to fetch IP");
    }

    #[test]
    fn search_errors_carry_status_reason_and_body() {
        let err = CapabilityError::UpstreamStatus {
            status: StatusCode::FORBIDDEN,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(
            search_error_text(&err),
            "Error fetching Google search results: Google API error: 403 Forbidden quota exceeded"
        );
    }

    #[test]
    fn request_errors_put_the_body_before_the_status_text() {
        let err = CapabilityError::UpstreamStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(
            request_error_text(&err),
            "Error making request: Request failed: 500 boom Internal Server Error"
        );
    }

    #[test]
    fn invalid_methods_are_reported_through_the_request_prefix() {
        let err = CapabilityError::InvalidRequest("invalid HTTP method: g et".to_string());
        assert_eq!(
            request_error_text(&err),
            "Error making request: invalid HTTP method: g et"
        );
    }
}
