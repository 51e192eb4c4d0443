//! Remote catalog configuration read from the environment.

use std::time::Duration;

use petstore_api::Client;

pub const BASE_URL_VAR: &str = "PETSTORE_BASE_URL";
pub const TIMEOUT_VAR: &str = "PETSTORE_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the remote pet store lives and how long a single call may take.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Applied to every remote call individually.
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CatalogConfig {
    /// Reads `PETSTORE_BASE_URL` and `PETSTORE_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = lookup(TIMEOUT_VAR)
            .and_then(|val| val.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Builds the raw API client this configuration describes.
    pub fn client(&self) -> Client {
        Client::with_base_url(&self.base_url).with_timeout(self.timeout)
    }
}
