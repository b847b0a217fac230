//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define WHAT the domain needs from persistence,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer              │  Adapter Layer
//! ──────────────────────────┼────────────────────────
//! trait SampleRepository    │  InMemoryStore
//!   fn insert_sample()      │  (+ JSON snapshot)
//!   fn collect_matching()   │
//! ```
//!
//! All methods take `&self`: stores are shared between concurrent requests
//! and own their synchronisation.

pub mod agent_repository;
pub mod hospital_repository;
pub mod sample_repository;
