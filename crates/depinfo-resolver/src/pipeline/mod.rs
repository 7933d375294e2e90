//! Pipeline driver: resolve every dependency in order, then join

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use depinfo_core::{DependencyRecord, ReportRow};
use depinfo_registry::PackageLookup;

use crate::aggregate::Aggregator;
use crate::policy::{Resolution, ResolutionPolicy, UnresolvedReason};

/// Knobs the driver honours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Retry budget per dependency
    pub max_wait: u32,
    /// Pause after each dependency, resolved or not
    pub inter_request_delay: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_wait: 20,
            inter_request_delay: Duration::ZERO,
        }
    }
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    /// Dependencies handled
    pub processed: usize,
    /// Dependencies that produced registry metadata
    pub resolved: usize,
    /// Dependencies reported with placeholder metadata
    pub not_found: usize,
    /// Dependencies left out of the report
    pub dropped: usize,
    /// Package variants held in the aggregate when the run ended
    pub variants: usize,
    /// Wall time of the run in milliseconds
    pub elapsed_ms: u64,
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Joined report rows
    pub rows: Vec<ReportRow>,
    /// Run counters
    pub summary: PipelineSummary,
    /// Final aggregate
    pub aggregate: Aggregator,
}

/// Sequential resolution pipeline
#[derive(Debug, Clone)]
pub struct Pipeline<L> {
    policy: ResolutionPolicy<L>,
    options: PipelineOptions,
}

impl<L: PackageLookup> Pipeline<L> {
    /// Create a pipeline over a lookup source
    pub fn new(lookup: L, options: PipelineOptions) -> Self {
        Self {
            policy: ResolutionPolicy::new(lookup),
            options,
        }
    }

    /// Resolve all dependencies and return the report rows
    pub async fn run(&self, dependencies: &[DependencyRecord]) -> Vec<ReportRow> {
        self.run_with_summary(dependencies).await.rows
    }

    /// Resolve all dependencies, keeping the counters and aggregate
    pub async fn run_with_summary(&self, dependencies: &[DependencyRecord]) -> PipelineReport {
        let start_time = Instant::now();
        let mut aggregator = Aggregator::new();
        let mut summary = PipelineSummary::default();

        for dependency in dependencies {
            let resolution = self.policy.resolve(dependency, self.options.max_wait).await;

            match resolution {
                Resolution {
                    package: Some(package),
                    not_found,
                } => {
                    if not_found {
                        warn!(
                            "{} is not on the registry, reporting it without metadata",
                            dependency.spec()
                        );
                        summary.not_found += 1;
                    } else {
                        summary.resolved += 1;
                    }
                    aggregator.add_if_absent_or_append(package);
                }
                unresolved => {
                    let reason = unresolved
                        .unresolved_reason()
                        .unwrap_or(UnresolvedReason::Unknown);
                    warn!(
                        "Unable to process package: {} for reason {}",
                        dependency.spec(),
                        reason
                    );
                    summary.dropped += 1;
                }
            }

            summary.processed += 1;
            info!("Processed: {}", summary.processed);

            if !self.options.inter_request_delay.is_zero() {
                tokio::time::sleep(self.options.inter_request_delay).await;
            }
        }

        let rows = aggregator.join_for_report(dependencies);
        summary.variants = aggregator.variant_count();
        summary.elapsed_ms = start_time.elapsed().as_millis() as u64;

        PipelineReport {
            rows,
            summary,
            aggregate: aggregator,
        }
    }
}
