/// User agent string for outbound HTTP requests
pub const USER_AGENT: &str = "mcp-edge-tools/0.1.0";

/// OpenWeatherMap API base URL
pub const OPENWEATHERMAP_API_BASE: &str = "https://api.openweathermap.org";

/// ipgeolocation.io API base URL
pub const IPGEOLOCATION_API_BASE: &str = "https://api.ipgeolocation.io";

/// Google Custom Search API base URL
pub const GOOGLE_CSE_API_BASE: &str = "https://www.googleapis.com";
