//! Inbound Adapters - HTTP transport
//!
//! Maps requests onto the lifecycle service and failure kinds onto status
//! codes. No business rules live here.

pub mod dto;
pub mod error;
pub mod http;
pub mod identity;
pub mod middleware;

pub use error::ApiError;
pub use http::{build_router, serve, AppState, Lifecycle};
