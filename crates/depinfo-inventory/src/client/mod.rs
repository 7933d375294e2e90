//! HTTP client for the dependency inventory service

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use camino::Utf8PathBuf;
use tracing::{debug, info};
use url::Url;

use depinfo_core::error::DepinfoError;
use depinfo_core::utils::file_name_of;
use depinfo_core::DependencyRecord;
use crate::api::{Organization, OrganizationsResponse, SearchRequest, SearchResponse, UploadResponse};
use crate::InventoryResult;

/// Socket.dev API root
pub const DEFAULT_INVENTORY_URL: &str = "https://api.socket.dev/v0";

/// Client for the inventory service
#[derive(Debug, Clone)]
pub struct InventoryClient {
    /// Underlying HTTP client carrying the auth header
    client: Client,
    /// Base API URL, without trailing slash
    base_url: String,
}

impl InventoryClient {
    /// Create a client for the public API
    pub fn new(api_key: &str) -> InventoryResult<Self> {
        Self::with_base_url(api_key, DEFAULT_INVENTORY_URL)
    }

    /// Create a client for a custom API root
    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> InventoryResult<Self> {
        if api_key.is_empty() {
            return Err(DepinfoError::config_missing("SOCKET_API.key"));
        }

        // The API key is the basic-auth user name with an empty password
        use base64::{Engine as _, engine::general_purpose};
        let auth_value = format!("Basic {}", general_purpose::STANDARD.encode(format!("{}:", api_key)));
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| DepinfoError::network(format!("Invalid basic auth: {}", e), e))?,
        );

        let client = ClientBuilder::new()
            .default_headers(headers)
            .user_agent(concat!("depinfo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DepinfoError::network(format!("Failed to create HTTP client: {}", e), e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base API URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of dependencies
    pub async fn get_dependencies(&self, limit: usize, offset: usize) -> InventoryResult<Vec<DependencyRecord>> {
        let url = format!("{}/dependencies/search", self.base_url);
        let response = self.client
            .post(&url)
            .json(&SearchRequest { limit, offset })
            .send()
            .await
            .map_err(|e| DepinfoError::network(format!("Unable to retrieve dependencies: {}", e), e))?;

        let response = ensure_success(response).await?;
        let result: SearchResponse = parse_json(response).await?;
        let rows = result.rows.unwrap_or_default();

        debug!("Fetched {} dependencies at offset {}", rows.len(), offset);
        Ok(rows)
    }

    /// Fetch up to `limit` dependencies, `page_size` at a time
    ///
    /// Without a page size everything is requested at once. Paging stops early
    /// when the service returns a short page.
    pub async fn get_all_dependencies(
        &self,
        limit: usize,
        page_size: Option<usize>,
    ) -> InventoryResult<Vec<DependencyRecord>> {
        let page_size = page_size.unwrap_or(limit).max(1);
        let mut dependencies = Vec::new();

        while dependencies.len() < limit {
            let wanted = page_size.min(limit - dependencies.len());
            let page = self.get_dependencies(wanted, dependencies.len()).await?;
            let received = page.len();
            dependencies.extend(page);

            if received < wanted {
                break;
            }
        }

        info!("Retrieved {} dependencies", dependencies.len());
        Ok(dependencies)
    }

    /// Organizations visible to the API key, ordered by id
    pub async fn get_organizations(&self) -> InventoryResult<Vec<Organization>> {
        let url = format!("{}/organizations", self.base_url);
        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| DepinfoError::network(format!("Unable to list organizations: {}", e), e))?;

        let response = ensure_success(response).await?;
        let result: OrganizationsResponse = parse_json(response).await?;
        Ok(result.organizations.into_values().collect())
    }

    /// Organizations with a given name, or all of them without one
    pub async fn find_organizations(&self, name: Option<&str>) -> InventoryResult<Vec<Organization>> {
        let organizations = self.get_organizations().await?;
        Ok(organizations
            .into_iter()
            .filter(|org| name.map_or(true, |name| org.name == name))
            .collect())
    }

    /// Upload manifest files for a repository and branch, returning the upload id
    ///
    /// An unreadable file aborts the upload.
    pub async fn post_dependencies(
        &self,
        files: &[Utf8PathBuf],
        repository: &str,
        branch: &str,
    ) -> InventoryResult<String> {
        let mut form = Form::new();
        for file in files {
            let contents = tokio::fs::read(file)
                .await
                .map_err(|e| DepinfoError::io(format!("Unable to open {}", file), e))?;
            let file_name = file_name_of(file.as_str()).to_string();
            let part = Part::bytes(contents)
                .file_name(file_name.clone())
                .mime_str("text/plain")
                .map_err(|e| DepinfoError::network(format!("Invalid upload part: {}", e), e))?;
            form = form.part(file_name, part);
        }

        let mut url = Url::parse(&format!("{}/dependencies/upload", self.base_url))
            .map_err(|e| DepinfoError::ConfigValidation {
                field: "url".to_string(),
                reason: format!("Invalid inventory URL '{}': {}", self.base_url, e),
            })?;
        url.query_pairs_mut()
            .append_pair("repository", repository)
            .append_pair("branch", branch);

        let response = self.client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DepinfoError::network(format!("Error posting dependencies: {}", e), e))?;

        let response = ensure_success(response).await?;
        let result: UploadResponse = parse_json(response).await?;

        info!("Uploaded {} manifest files as {}", files.len(), result.id);
        Ok(result.id)
    }
}

/// Turn any non-200 response into an inventory error carrying the body
async fn ensure_success(response: Response) -> InventoryResult<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DepinfoError::Inventory {
        status: status.as_u16(),
        body,
    })
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> InventoryResult<T> {
    response.json::<T>().await.map_err(|e| DepinfoError::JsonParse {
        message: format!("Failed to parse inventory response: {}", e),
    })
}
