//! Domain Services - Business rules that don't belong to a single entity
//!
//! Services here are pure: no I/O, no async, no clocks.

pub mod ownership;
