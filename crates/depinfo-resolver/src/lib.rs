//! Dependency resolution pipeline for depinfo
//!
//! This crate turns inventory dependency records into report rows: the
//! resolution policy drives registry lookups with fallback and retry, the
//! aggregator groups resolved packages by name, and the pipeline driver ties
//! them together with inter-request pacing.

pub mod aggregate;
pub mod pipeline;
pub mod policy;

#[cfg(test)]
mod testing;

// Re-export main types
pub use aggregate::{join_for_report, AggregateMap, Aggregator, SharedAggregator};
pub use pipeline::{Pipeline, PipelineOptions, PipelineReport, PipelineSummary};
pub use policy::{Resolution, ResolutionPolicy, UnresolvedReason};
