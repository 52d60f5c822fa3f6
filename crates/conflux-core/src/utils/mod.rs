//! Utility functions and helpers.
//!
//! Common functionality used across multiple conflux crates.

pub mod hash;

// Re-export commonly used utilities
pub use hash::{blake3_hash, subgraph_key};
