//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from specimen-domain.

pub mod in_memory;
pub mod snapshot;

pub use in_memory::InMemoryStore;
pub use snapshot::{SnapshotError, SnapshotFile};
