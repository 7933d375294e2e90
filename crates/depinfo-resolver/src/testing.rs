//! Scripted registry double shared by the resolver tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use depinfo_core::PackageInfo;
use depinfo_registry::{LookupOutcome, PackageLookup};

/// Replays scripted outcomes per request path
///
/// Each path holds a queue; the last outcome repeats once the queue is down
/// to one entry. Unscripted paths answer `NotFound`.
#[derive(Debug, Default)]
pub struct ScriptedLookup {
    scripts: Mutex<HashMap<String, VecDeque<LookupOutcome>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `GET {name}/{version}`
    pub fn on_exact<I>(self, name: &str, version: &str, outcomes: I) -> Self
    where
        I: IntoIterator<Item = LookupOutcome>,
    {
        self.script(format!("{}/{}", name, version), outcomes)
    }

    /// Script `GET {name}`
    pub fn on_package<I>(self, name: &str, outcomes: I) -> Self
    where
        I: IntoIterator<Item = LookupOutcome>,
    {
        self.script(name.to_string(), outcomes)
    }

    fn script<I>(self, path: String, outcomes: I) -> Self
    where
        I: IntoIterator<Item = LookupOutcome>,
    {
        self.scripts
            .lock()
            .unwrap()
            .insert(path, outcomes.into_iter().collect());
        self
    }

    /// Every requested path, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How often one path was requested
    pub fn call_count(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| *p == path).count()
    }

    fn next(&self, path: String) -> LookupOutcome {
        self.calls.lock().unwrap().push(path.clone());

        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(LookupOutcome::NotFound),
            None => LookupOutcome::NotFound,
        }
    }
}

impl PackageLookup for ScriptedLookup {
    async fn lookup_exact(&self, name: &str, version: &str) -> LookupOutcome {
        self.next(format!("{}/{}", name, version))
    }

    async fn lookup_latest_or_any(&self, name: &str, _fallback_version: &str) -> LookupOutcome {
        self.next(name.to_string())
    }
}

/// Resolved outcome for a package with a license and repository
pub fn resolved(name: &str, version: &str, license: &str) -> LookupOutcome {
    LookupOutcome::Resolved(
        PackageInfo::new(name, version)
            .with_license(license)
            .with_repository_url(format!("https://github.com/x/{}", name)),
    )
}
