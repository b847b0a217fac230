//! Caller identity
//!
//! An upstream authentication gateway verifies the caller and forwards the
//! agent id in a request header. This module only reads it; it verifies
//! nothing.

use axum::http::{HeaderMap, HeaderName};
use specimen_domain::AgentId;

use super::error::ApiError;

pub const DEFAULT_IDENTITY_HEADER: &str = "x-agent-id";

/// Resolve the acting agent: the identity header wins, then the legacy
/// request field. Blank values count as absent.
pub fn resolve_agent(
    headers: &HeaderMap,
    header: &HeaderName,
    fallback: Option<String>,
) -> Result<AgentId, ApiError> {
    let from_header = headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    from_header
        .or_else(|| fallback.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
        .map(AgentId::new)
        .ok_or_else(ApiError::missing_agent)
}
