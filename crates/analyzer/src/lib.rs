//! `armory-analyzer` library crate.
//!
//! Wires the remote source, the persisted stores and the domain logic
//! into a single census run. The binary entrypoint lives in `main.rs`;
//! the modules are public for integration testing.

pub mod config;
pub mod fetcher;
pub mod generations;
pub mod pipeline;
pub mod report;

pub use pipeline::{AnalysisReport, Analyzer, AnalyzerError};
