//! forest-util - Test tooling for avl-forest
//!
//! Seeded random workload generation and replayable operation scripts.

pub mod fuzzer;
pub mod script;

// Re-exports for convenience
pub use fuzzer::{Fuzzer, SEED_ENV};
pub use script::{Op, OpScript};
