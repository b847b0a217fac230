//! # Specimen Use Case Layer
//!
//! Application-specific business rules.
//! This layer orchestrates the flow of data between the domain and adapters:
//!
//! - [`SampleLifecycle`] - create, list and collect samples
//! - [`DirectoryService`] - register hospitals and agents, seed fixtures
//!
//! Every operation takes the caller's agent identity as an explicit argument.
//! Authentication happens before this layer is reached.

pub mod clock;
pub mod directory;
pub mod error;
pub mod sample_lifecycle;

#[cfg(test)]
mod test_support;

pub use specimen_domain;

pub use clock::{Clock, ManualClock};
pub use directory::{DirectoryService, SeedFixture, SeedReport};
pub use error::{ErrorKind, Result, ServiceError};
pub use sample_lifecycle::{CreateSample, SampleLifecycle};
