//! # Specimen Domain Layer
//!
//! Pure business vocabulary for sample tracking: who collects what, for whom,
//! and when a sample is allowed to change state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects                      ││
//! │  │  repository/- Trait definitions (not implementations)       ││
//! │  │  service/   - Domain services (OwnershipFilter)             ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate has ZERO external dependencies.**
//!
//! Storage engines, HTTP frameworks and clocks are adapter concerns.

pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    agent::{Agent, AgentId},
    hospital::{Hospital, HospitalId, NewHospital},
    sample::{NewSample, Sample, SampleError, SampleId, SampleStatus, SampleWithHospital},
    timestamp::Timestamp,
};

pub use repository::{
    agent_repository::AgentRepository,
    hospital_repository::HospitalRepository,
    sample_repository::{ReferenceKind, RepositoryError, SampleRepository},
};

pub use service::ownership::OwnershipFilter;
