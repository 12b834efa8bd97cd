use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use npm_resolve_constants::{DEFAULT_ACCEPT_HEADER, DEFAULT_REGISTRY, DEFAULT_TIMEOUT_MS};
pub use npm_resolve_constants::USER_AGENT as DEFAULT_USER_AGENT;

/// Loose npm registry document: `versions` plus `dist-tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryDocument {
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: IndexMap<String, String>,
    #[serde(default)]
    pub versions: IndexMap<String, VersionRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionRecord {
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: IndexMap<String, String>,
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: IndexMap<String, String>,
}

#[derive(Debug, Clone)]
pub enum RegistryError {
    Transport(String),
    Status(u16),
    Parse(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status(code) => write!(f, "registry returned status {code}"),
            Self::Parse(msg) => write!(f, "failed to parse registry document: {msg}"),
        }
    }
}

impl std::error::Error for RegistryError {}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Configuration accepted by `RegistryClient::new`.
#[derive(Debug, Clone)]
pub struct RegistryClientConfig {
    pub registry: String,
    pub timeout_ms: u64,
    pub headers: IndexMap<String, String>,
}

impl Default for RegistryClientConfig {
    fn default() -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            headers: IndexMap::new(),
        }
    }
}

pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    headers: HeaderMap,
}

impl RegistryClient {
    #[must_use]
    pub fn new(config: RegistryClientConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT_HEADER));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        for (name, value) in &config.headers {
            if let (Ok(header_name), Ok(header_value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(header_name, header_value);
            }
        }

        Self {
            client: reqwest::Client::new(),
            base_url: config.registry.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
            headers,
        }
    }

    /// Fetch the package-level metadata document for `name`.
    pub async fn fetch_package_info(&self, name: &str) -> Result<RegistryDocument> {
        let url = format!("{}/{}", self.base_url, encode_package_name(name));

        npm_resolve_logger::debug(&format!("fetching {name} from {url}"), true);

        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::Status(response.status().as_u16()));
        }

        response
            .json::<RegistryDocument>()
            .await
            .map_err(|e| RegistryError::Parse(e.to_string()))
    }
}

/// Percent-encode the `/` in a scoped package name: `@scope/pkg` -> `@scope%2Fpkg`.
fn encode_package_name(name: &str) -> String {
    match name.split_once('/') {
        Some((scope, rest)) => format!("{scope}%2F{}", urlencoding::encode(rest)),
        None => name.to_string(),
    }
}
