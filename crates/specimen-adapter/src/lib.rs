//! # Specimen Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `controller/` - Inbound adapters (HTTP via axum)
//! - `repository/` - Persistence implementations
//! - `clock` - System time

pub mod clock;
pub mod controller;
pub mod repository;
