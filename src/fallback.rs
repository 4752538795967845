//! Seam for inbound HTTP traffic that is not a tool invocation.
//!
//! The embedding environment owns the actual proxy behavior; this crate
//! only forwards. See [`crate::service::EdgeTools::forward_unmatched`].

use std::collections::HashMap;

use async_trait::async_trait;

/// An inbound HTTP request the dispatch layer did not recognize.
#[derive(Debug, Clone)]
pub struct ProxiedRequest {
    pub method: String,
    /// Path and query exactly as received.
    pub uri: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// The response produced for an unmatched request.
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl ProxiedResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }
}

/// Handles HTTP requests that match no capability invocation.
///
/// Implementations are supplied by the embedding environment and receive
/// the request unmodified.
#[async_trait]
pub trait FallbackHandler: Send + Sync {
    async fn handle(&self, request: ProxiedRequest) -> ProxiedResponse;
}
