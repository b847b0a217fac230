//! Domain Models - The vocabulary of sample tracking
//!
//! Every name here should match how field teams talk about the work:
//! an agent collects a sample for a hospital.

pub mod agent;
pub mod hospital;
pub mod sample;
pub mod timestamp;
