//! HTTP client implementation for single registry lookups

use std::time::Duration;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::{debug, info, warn};

use depinfo_core::error::DepinfoError;
use crate::api::RegistryPayload;
use crate::lookup::{LookupOutcome, PackageLookup, SERVICE_UNAVAILABLE_WAIT};
use crate::RegistryResult;

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.com";

/// Main HTTP client for npm registry lookups
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Base registry URL, without trailing slash
    base_url: String,
}

impl RegistryClient {
    /// Create a client for the public npm registry
    pub fn new() -> RegistryResult<Self> {
        Self::with_base_url(DEFAULT_REGISTRY_URL)
    }

    /// Create a client for a custom registry
    pub fn with_base_url(base_url: impl Into<String>) -> RegistryResult<Self> {
        // No request timeout: the transport defaults apply
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .gzip(true)
            .user_agent(concat!("depinfo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DepinfoError::network(format!("Failed to create HTTP client: {}", e), e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base registry URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one GET and classify the response
    async fn fetch(&self, path: String, name: &str, version: &str) -> LookupOutcome {
        let url = format!("{}/{}", self.base_url, path);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to perform request for {}: {}", url, e);
                return LookupOutcome::TransientError {
                    message: e.to_string(),
                };
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<RegistryPayload>().await {
                Ok(payload) => {
                    debug!("Resolved {} from {}", name, url);
                    LookupOutcome::Resolved(payload.into_package(name, version))
                }
                Err(e) => {
                    warn!("Failed to parse registry response for {}: {}", url, e);
                    LookupOutcome::TransientError {
                        message: format!("Failed to parse metadata: {}", e),
                    }
                }
            },
            StatusCode::NOT_FOUND => {
                debug!("{} returned 404", url);
                LookupOutcome::NotFound
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = parse_retry_after(response.headers());
                info!("npm rate limit hit try after {}", retry_after.as_secs());
                LookupOutcome::RateLimited { retry_after }
            }
            StatusCode::SERVICE_UNAVAILABLE => {
                info!("NPM Service availability issue");
                LookupOutcome::ServiceUnavailable {
                    retry_after: SERVICE_UNAVAILABLE_WAIT,
                }
            }
            status => {
                warn!("Registry returned status {} for {}", status, url);
                LookupOutcome::TransientError {
                    message: format!("Registry returned status {}", status),
                }
            }
        }
    }

    /// Encode package name for URL (handle scoped packages)
    fn encode_package_name(&self, name: &str) -> String {
        if name.starts_with('@') {
            // Scoped package: @org/pkg → @org%2fpkg
            name.replace('/', "%2f")
        } else {
            name.to_string()
        }
    }
}

impl PackageLookup for RegistryClient {
    async fn lookup_exact(&self, name: &str, version: &str) -> LookupOutcome {
        let path = format!("{}/{}", self.encode_package_name(name), version);
        self.fetch(path, name, version).await
    }

    async fn lookup_latest_or_any(&self, name: &str, fallback_version: &str) -> LookupOutcome {
        let path = self.encode_package_name(name);
        self.fetch(path, name, fallback_version).await
    }
}

/// Read `Retry-After` as whole seconds
///
/// A missing or non-numeric header (e.g. an HTTP date) falls back to the
/// service-unavailable wait.
fn parse_retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(SERVICE_UNAVAILABLE_WAIT)
}
