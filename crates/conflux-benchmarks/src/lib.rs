//! conflux benchmarking suite
//!
//! Benchmarks for graph builds, catalog parsing and sub-graph key hashing,
//! plus the synthetic catalog shapes they run against.

pub mod common;

pub use common::*;
