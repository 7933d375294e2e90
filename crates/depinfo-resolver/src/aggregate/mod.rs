//! Aggregation of resolved packages and the join back onto dependencies

use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;

use depinfo_core::{DependencyRecord, PackageInfo, ReportRow};

/// Package name → every variant resolved under that name, in insertion order
pub type AggregateMap = IndexMap<String, Vec<PackageInfo>>;

/// Collects resolved packages keyed by name
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    packages: AggregateMap,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a package under its name, creating the entry on first sight
    pub fn add_if_absent_or_append(&mut self, package: PackageInfo) {
        self.packages
            .entry(package.name.clone())
            .or_default()
            .push(package);
    }

    /// Variants stored under one name
    pub fn get(&self, name: &str) -> Option<&[PackageInfo]> {
        self.packages.get(name).map(Vec::as_slice)
    }

    /// Number of distinct package names
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether nothing has been added yet
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Number of stored variants across all names
    pub fn variant_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }

    /// The underlying map
    pub fn as_map(&self) -> &AggregateMap {
        &self.packages
    }

    /// Rows for every dependency against this aggregate
    pub fn join_for_report(&self, dependencies: &[DependencyRecord]) -> Vec<ReportRow> {
        join_for_report(dependencies, &self.packages)
    }
}

/// Join dependencies with the aggregate
///
/// Every dependency yields one row per variant stored under its name, so two
/// same-name dependencies over two variants give four rows. Dependencies whose
/// name has no entry yield nothing.
pub fn join_for_report(dependencies: &[DependencyRecord], aggregate: &AggregateMap) -> Vec<ReportRow> {
    dependencies
        .iter()
        .filter_map(|dependency| {
            aggregate
                .get(&dependency.name)
                .map(|variants| (dependency, variants))
        })
        .flat_map(|(dependency, variants)| {
            variants
                .iter()
                .map(move |package| ReportRow::join(dependency, package))
        })
        .collect()
}

/// Aggregator that several tasks can append to
///
/// Map mutation is serialized behind a mutex; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct SharedAggregator {
    inner: Arc<Mutex<Aggregator>>,
}

impl SharedAggregator {
    /// Create an empty shared aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a package under its name
    pub fn add_if_absent_or_append(&self, package: PackageInfo) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_if_absent_or_append(package);
    }

    /// Copy of the current aggregate
    pub fn snapshot(&self) -> Aggregator {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, version: &str) -> PackageInfo {
        PackageInfo::new(name, version).with_license("MIT")
    }

    #[test]
    fn test_add_creates_then_appends() {
        let mut aggregator = Aggregator::new();
        aggregator.add_if_absent_or_append(pkg("lodash", "4.17.20"));
        aggregator.add_if_absent_or_append(pkg("react", "18.2.0"));
        aggregator.add_if_absent_or_append(pkg("lodash", "4.17.21"));

        assert_eq!(aggregator.len(), 2);
        assert_eq!(aggregator.variant_count(), 3);

        let versions: Vec<_> = aggregator
            .get("lodash")
            .unwrap()
            .iter()
            .map(|p| p.version.as_str())
            .collect();
        assert_eq!(versions, vec!["4.17.20", "4.17.21"]);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut aggregator = Aggregator::new();
        for name in ["zeta", "alpha", "mid"] {
            aggregator.add_if_absent_or_append(pkg(name, "1.0.0"));
        }

        let names: Vec<_> = aggregator.as_map().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_join_is_cross_product_per_dependency() {
        let deps = vec![
            DependencyRecord::new("lodash", "4.17.20").in_repository("web", "main"),
            DependencyRecord::new("lodash", "4.17.21").in_repository("api", "develop"),
        ];
        let mut aggregator = Aggregator::new();
        aggregator.add_if_absent_or_append(pkg("lodash", "4.17.20"));
        aggregator.add_if_absent_or_append(pkg("lodash", "4.17.21"));

        let rows = aggregator.join_for_report(&deps);

        assert_eq!(rows.len(), 4);
        let pairs: Vec<_> = rows
            .iter()
            .map(|r| (r.repository.as_str(), r.branch.as_str(), r.package_version.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("web", "main", "4.17.20"),
                ("web", "main", "4.17.21"),
                ("api", "develop", "4.17.20"),
                ("api", "develop", "4.17.21"),
            ]
        );
    }

    #[test]
    fn test_join_skips_unknown_names() {
        let deps = vec![
            DependencyRecord::new("missing", "1.0.0").in_repository("web", "main"),
            DependencyRecord::new("react", "18.2.0").in_repository("web", "main"),
        ];
        let mut aggregator = Aggregator::new();
        aggregator.add_if_absent_or_append(pkg("react", "18.2.0"));

        let rows = join_for_report(&deps, aggregator.as_map());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].package_name, "react");
    }

    #[test]
    fn test_join_empty() {
        assert!(join_for_report(&[], &AggregateMap::new()).is_empty());
    }

    #[tokio::test]
    async fn test_shared_aggregator_across_tasks() {
        let shared = SharedAggregator::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                tokio::spawn(async move {
                    shared.add_if_absent_or_append(pkg("left-pad", &format!("1.0.{}", i)));
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let aggregate = shared.snapshot();
        assert_eq!(aggregate.len(), 1);
        assert_eq!(aggregate.get("left-pad").unwrap().len(), 8);
    }
}
