//! HTTP client for the Swagger pet-store API.

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, StatusQuery},
    types::{PetID, PetPayload, RawPet},
    user_agent::get_user_agent,
    Error,
};

const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the pet-store API.
///
/// Each request builds a fresh `reqwest::Client` carrying the configured
/// per-call timeout. Nothing is cached between calls.
pub struct Client {
    /// Base URL for the API. Defaults to `https://petstore.swagger.io/v2`.
    base_api_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the public Swagger pet store.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}/{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    /// Sends one request and returns the body of a 2xx response.
    async fn send(
        &self,
        method: Method,
        url: Url,
        payload: Option<&PetPayload>,
    ) -> Result<String, Error> {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;

        tracing::info!("[API REQUEST] {} {}", method, url);
        let mut request = client
            .request(method.clone(), url.clone())
            .header("accept", "application/json");
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to send {} {}: {}", method, url, e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;
        tracing::info!("[API RESPONSE] {} {} - Status: {}", method, url, status);

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        Ok(body)
    }

    /// Lists every pet whose status matches the query.
    ///
    /// Array elements that are not JSON objects are dropped; a body that is
    /// not an array at all is an error.
    pub async fn find_by_status(&self, query: &StatusQuery) -> Result<Vec<RawPet>, Error> {
        let url = self.get_url("pet/findByStatus", Some(query))?;
        let body = self.send(Method::GET, url, None).await?;
        let items: Vec<serde_json::Value> = parse_body(&body)?;
        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<RawPet>(item) {
                Ok(pet) => Some(pet),
                Err(e) => {
                    tracing::warn!("Dropping malformed pet entry: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Fetches a single pet by its numeric ID.
    pub async fn get_pet(&self, pet_id: PetID) -> Result<RawPet, Error> {
        let url = self.get_url(format!("pet/{}", pet_id).as_str(), None::<&StatusQuery>)?;
        let body = self.send(Method::GET, url, None).await?;
        parse_body(&body)
    }

    /// Creates a pet and returns the record the server echoed back.
    pub async fn create_pet(&self, payload: &PetPayload) -> Result<RawPet, Error> {
        let url = self.get_url("pet", None::<&StatusQuery>)?;
        let body = self.send(Method::POST, url, Some(payload)).await?;
        parse_body(&body)
    }

    /// Replaces an existing pet. The response body is not inspected.
    pub async fn update_pet(&self, payload: &PetPayload) -> Result<(), Error> {
        let url = self.get_url("pet", None::<&StatusQuery>)?;
        self.send(Method::PUT, url, Some(payload)).await?;
        Ok(())
    }

    /// Deletes a pet. A 404 comes back as `Error::HttpStatus`; callers decide what it means.
    pub async fn delete_pet(&self, pet_id: PetID) -> Result<(), Error> {
        let url = self.get_url(format!("pet/{}", pet_id).as_str(), None::<&StatusQuery>)?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::RequestFailed
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
