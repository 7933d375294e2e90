//! Resolution policy: lookup, fallback and retry for one dependency
//!
//! The policy asks for the exact version first. A 404 there falls back to the
//! package-level document; a 404 on both produces a placeholder package so the
//! dependency still shows up in the report. Rate limiting and service
//! unavailability are retried after the wait the registry asked for, bounded by
//! a retry budget. Any other failure gives up immediately.

use std::fmt;

use tracing::{debug, info, warn};

use depinfo_core::{DependencyRecord, PackageInfo};
use depinfo_registry::{LookupOutcome, PackageLookup};

/// Terminal result of resolving one dependency
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Resolved package, or a placeholder when `not_found` is set
    pub package: Option<PackageInfo>,
    /// The registry confirmed absence at both the exact and package level
    pub not_found: bool,
}

/// Why a dependency produced no package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The registry reported absence at both levels
    NotFound,
    /// Every other give-up: exhausted retries, transport or parse failures
    Unknown,
}

impl Resolution {
    /// A package came back from the registry
    pub fn resolved(package: PackageInfo) -> Self {
        Self {
            package: Some(package),
            not_found: false,
        }
    }

    /// Neither lookup level knows the package; report it with blank metadata
    pub fn not_found(dependency: &DependencyRecord) -> Self {
        Self {
            package: Some(PackageInfo::new(&dependency.name, &dependency.version)),
            not_found: true,
        }
    }

    /// Gave up without an answer
    pub fn gave_up() -> Self {
        Self {
            package: None,
            not_found: false,
        }
    }

    /// Reason to log when no package was produced
    pub fn unresolved_reason(&self) -> Option<UnresolvedReason> {
        match (&self.package, self.not_found) {
            (Some(_), _) => None,
            (None, true) => Some(UnresolvedReason::NotFound),
            (None, false) => Some(UnresolvedReason::Unknown),
        }
    }
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NotFound => write!(f, "NotFound"),
            UnresolvedReason::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Drives a [`PackageLookup`] until a dependency reaches a terminal outcome
#[derive(Debug, Clone)]
pub struct ResolutionPolicy<L> {
    lookup: L,
}

impl<L: PackageLookup> ResolutionPolicy<L> {
    /// Create a policy over a lookup source
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Resolve one dependency
    ///
    /// `max_wait` bounds the number of rate-limit/unavailable retries. Each
    /// retry sleeps for the wait the registry suggested but counts as one unit
    /// against the budget, however long that wait was.
    pub async fn resolve(&self, dependency: &DependencyRecord, max_wait: u32) -> Resolution {
        let name = dependency.name.as_str();
        let version = dependency.version.as_str();
        let mut retries: u32 = 0;

        loop {
            let outcome = match self.lookup.lookup_exact(name, version).await {
                LookupOutcome::NotFound => {
                    info!(
                        "{} not found on the NPM registry, trying base package",
                        dependency.spec()
                    );
                    self.lookup.lookup_latest_or_any(name, version).await
                }
                other => other,
            };

            match outcome {
                LookupOutcome::Resolved(package) => return Resolution::resolved(package),
                // only the package-level lookup gets here
                LookupOutcome::NotFound => {
                    info!("{} not found on the NPM registry", name);
                    return Resolution::not_found(dependency);
                }
                LookupOutcome::TransientError { message } => {
                    debug!("Lookup for {} failed: {}", dependency.spec(), message);
                    return Resolution::gave_up();
                }
                retryable => {
                    let Some(wait) = retryable.retry_after() else {
                        return Resolution::gave_up();
                    };
                    if retries >= max_wait {
                        warn!(
                            "Giving up on {} after {} retries ({})",
                            dependency.spec(),
                            retries,
                            retryable.kind()
                        );
                        return Resolution::gave_up();
                    }
                    debug!(
                        "{} on {}, retrying in {}s (retry {})",
                        retryable.kind(),
                        dependency.spec(),
                        wait.as_secs(),
                        retries + 1
                    );
                    tokio::time::sleep(wait).await;
                    retries += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    use crate::testing::{resolved, ScriptedLookup};

    fn dep(name: &str, version: &str) -> DependencyRecord {
        DependencyRecord::new(name, version).in_repository("r1", "main")
    }

    fn assert_elapsed(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_secs(1),
            "expected ~{:?}, slept {:?}",
            expected,
            elapsed
        );
    }

    fn rate_limited(seconds: u64) -> LookupOutcome {
        LookupOutcome::RateLimited {
            retry_after: Duration::from_secs(seconds),
        }
    }

    #[tokio::test]
    async fn test_exact_hit() {
        let lookup = ScriptedLookup::new().on_exact("left-pad", "1.0.0", [resolved("left-pad", "1.0.0", "MIT")]);
        let policy = ResolutionPolicy::new(&lookup);

        let resolution = policy.resolve(&dep("left-pad", "1.0.0"), 20).await;

        assert!(!resolution.not_found);
        assert_eq!(resolution.package.unwrap().license, "MIT");
        assert_eq!(lookup.calls(), vec!["left-pad/1.0.0"]);
    }

    #[tokio::test]
    async fn test_fallback_to_package_level() {
        let lookup = ScriptedLookup::new()
            .on_exact("left-pad", "0.0.0-bogus", [LookupOutcome::NotFound])
            .on_package("left-pad", [resolved("left-pad", "0.0.0-bogus", "WTFPL")]);
        let policy = ResolutionPolicy::new(&lookup);

        let resolution = policy.resolve(&dep("left-pad", "0.0.0-bogus"), 20).await;

        assert!(!resolution.not_found);
        assert_eq!(resolution.package.unwrap().license, "WTFPL");
        assert_eq!(lookup.calls(), vec!["left-pad/0.0.0-bogus", "left-pad"]);
    }

    #[tokio::test]
    async fn test_not_found_at_both_levels_synthesizes_package() {
        let lookup = ScriptedLookup::new()
            .on_exact("ghost", "1.0.0", [LookupOutcome::NotFound])
            .on_package("ghost", [LookupOutcome::NotFound]);
        let policy = ResolutionPolicy::new(&lookup);

        let resolution = policy.resolve(&dep("ghost", "1.0.0"), 20).await;

        assert!(resolution.not_found);
        let package = resolution.package.clone().unwrap();
        assert_eq!(package.name, "ghost");
        assert_eq!(package.version, "1.0.0");
        assert_eq!(package.license, "");
        assert_eq!(package.repository_url, "");
        assert_eq!(resolution.unresolved_reason(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_budget_counts_retries_not_seconds() {
        let lookup = ScriptedLookup::new().on_exact("busy", "1.0.0", [rate_limited(5)]);
        let policy = ResolutionPolicy::new(&lookup);
        let start = Instant::now();

        let resolution = policy.resolve(&dep("busy", "1.0.0"), 20).await;

        assert_eq!(resolution, Resolution::gave_up());
        // the first attempt plus exactly 20 retries
        assert_eq!(lookup.call_count("busy/1.0.0"), 21);
        assert_elapsed(start, Duration::from_secs(20 * 5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_then_success() {
        let lookup = ScriptedLookup::new().on_exact(
            "busy",
            "1.0.0",
            [rate_limited(3), rate_limited(3), resolved("busy", "1.0.0", "ISC")],
        );
        let policy = ResolutionPolicy::new(&lookup);
        let start = Instant::now();

        let resolution = policy.resolve(&dep("busy", "1.0.0"), 20).await;

        assert_eq!(resolution.package.unwrap().license, "ISC");
        assert_eq!(lookup.call_count("busy/1.0.0"), 3);
        assert_elapsed(start, Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_service_unavailable_waits_fixed_interval() {
        let lookup = ScriptedLookup::new().on_exact(
            "flaky",
            "2.0.0",
            [
                LookupOutcome::ServiceUnavailable {
                    retry_after: Duration::from_secs(15),
                },
                resolved("flaky", "2.0.0", "MIT"),
            ],
        );
        let policy = ResolutionPolicy::new(&lookup);
        let start = Instant::now();

        let resolution = policy.resolve(&dep("flaky", "2.0.0"), 20).await;

        assert!(resolution.package.is_some());
        assert_elapsed(start, Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_fallback_restarts_from_exact() {
        let lookup = ScriptedLookup::new()
            .on_exact("moved", "1.0.0", [LookupOutcome::NotFound])
            .on_package("moved", [rate_limited(1), resolved("moved", "3.0.0", "MIT")]);
        let policy = ResolutionPolicy::new(&lookup);

        let resolution = policy.resolve(&dep("moved", "1.0.0"), 20).await;

        assert_eq!(resolution.package.unwrap().version, "3.0.0");
        assert_eq!(lookup.calls(), vec!["moved/1.0.0", "moved", "moved/1.0.0", "moved"]);
    }

    #[tokio::test]
    async fn test_zero_budget_gives_up_immediately() {
        let lookup = ScriptedLookup::new().on_exact("busy", "1.0.0", [rate_limited(5)]);
        let policy = ResolutionPolicy::new(&lookup);

        let resolution = policy.resolve(&dep("busy", "1.0.0"), 0).await;

        assert_eq!(resolution, Resolution::gave_up());
        assert_eq!(lookup.call_count("busy/1.0.0"), 1);
    }

    #[tokio::test]
    async fn test_transient_error_is_not_retried() {
        let lookup = ScriptedLookup::new().on_exact(
            "broken",
            "1.0.0",
            [LookupOutcome::TransientError {
                message: "connection reset".to_string(),
            }],
        );
        let policy = ResolutionPolicy::new(&lookup);

        let resolution = policy.resolve(&dep("broken", "1.0.0"), 20).await;

        assert_eq!(resolution, Resolution::gave_up());
        assert_eq!(resolution.unresolved_reason(), Some(UnresolvedReason::Unknown));
        assert_eq!(lookup.calls().len(), 1);
    }

    #[test]
    fn test_unresolved_reason() {
        let not_found = Resolution {
            package: None,
            not_found: true,
        };
        assert_eq!(not_found.unresolved_reason(), Some(UnresolvedReason::NotFound));
        assert_eq!(UnresolvedReason::NotFound.to_string(), "NotFound");
        assert_eq!(UnresolvedReason::Unknown.to_string(), "Unknown");
    }
}
