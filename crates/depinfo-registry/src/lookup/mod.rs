//! Lookup outcomes and the lookup trait the resolution policy drives

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use depinfo_core::PackageInfo;

/// Suggested wait after the registry reports 503
pub const SERVICE_UNAVAILABLE_WAIT: Duration = Duration::from_secs(15);

/// Classified result of a single registry lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// 200 with a parseable package document
    Resolved(PackageInfo),
    /// 404
    NotFound,
    /// 429, with the `Retry-After` wait
    RateLimited { retry_after: Duration },
    /// 503, with a fixed suggested wait
    ServiceUnavailable { retry_after: Duration },
    /// Transport, parse or unexpected-status failure
    TransientError { message: String },
}

impl LookupOutcome {
    /// Wait requested by the registry, for outcomes worth retrying
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LookupOutcome::RateLimited { retry_after }
            | LookupOutcome::ServiceUnavailable { retry_after } => Some(*retry_after),
            _ => None,
        }
    }

    /// Short name of the outcome kind
    pub fn kind(&self) -> &'static str {
        match self {
            LookupOutcome::Resolved(_) => "Resolved",
            LookupOutcome::NotFound => "NotFound",
            LookupOutcome::RateLimited { .. } => "RateLimited",
            LookupOutcome::ServiceUnavailable { .. } => "ServiceUnavailable",
            LookupOutcome::TransientError { .. } => "TransientError",
        }
    }
}

/// Source of package metadata
///
/// Implementations must never fail past this boundary: every problem is a
/// [`LookupOutcome`] variant. They hold no per-call state, so one instance can
/// serve concurrent resolutions.
pub trait PackageLookup: Send + Sync {
    /// Look up one exact version, `GET {base}/{name}/{version}`
    fn lookup_exact(&self, name: &str, version: &str) -> impl Future<Output = LookupOutcome> + Send;

    /// Look up the package document, `GET {base}/{name}`
    ///
    /// `fallback_version` fills in the version when the document has none.
    fn lookup_latest_or_any(
        &self,
        name: &str,
        fallback_version: &str,
    ) -> impl Future<Output = LookupOutcome> + Send;
}

impl<T: PackageLookup> PackageLookup for &T {
    fn lookup_exact(&self, name: &str, version: &str) -> impl Future<Output = LookupOutcome> + Send {
        (**self).lookup_exact(name, version)
    }

    fn lookup_latest_or_any(
        &self,
        name: &str,
        fallback_version: &str,
    ) -> impl Future<Output = LookupOutcome> + Send {
        (**self).lookup_latest_or_any(name, fallback_version)
    }
}

impl<T: PackageLookup> PackageLookup for Arc<T> {
    fn lookup_exact(&self, name: &str, version: &str) -> impl Future<Output = LookupOutcome> + Send {
        (**self).lookup_exact(name, version)
    }

    fn lookup_latest_or_any(
        &self,
        name: &str,
        fallback_version: &str,
    ) -> impl Future<Output = LookupOutcome> + Send {
        (**self).lookup_latest_or_any(name, fallback_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after() {
        let limited = LookupOutcome::RateLimited {
            retry_after: Duration::from_secs(5),
        };
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(5)));

        let unavailable = LookupOutcome::ServiceUnavailable {
            retry_after: SERVICE_UNAVAILABLE_WAIT,
        };
        assert_eq!(unavailable.retry_after(), Some(Duration::from_secs(15)));

        assert_eq!(LookupOutcome::NotFound.retry_after(), None);
        assert_eq!(
            LookupOutcome::TransientError {
                message: "reset".to_string()
            }
            .retry_after(),
            None
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(LookupOutcome::NotFound.kind(), "NotFound");
        assert_eq!(
            LookupOutcome::Resolved(PackageInfo::new("a", "1.0.0")).kind(),
            "Resolved"
        );
    }
}
