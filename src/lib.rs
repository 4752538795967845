//! Edge-deployed MCP tool server: weather lookup, IP geolocation, web
//! search, generic HTTP passthrough and a random card draw, plus a
//! fallback seam for inbound traffic that matches no tool call.

pub mod cards;
pub mod config;
pub mod constants;
pub mod error;
pub mod fallback;
pub mod formatters;
pub mod models;
pub mod service;

pub use config::{ApiBases, Config, ConfigError};
pub use error::CapabilityError;
pub use fallback::{FallbackHandler, ProxiedRequest, ProxiedResponse};
pub use service::EdgeTools;
