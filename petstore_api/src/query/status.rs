//! Query builder for the `/pet/findByStatus` endpoint.

use url::Url;

use crate::types::PetStatus;

use super::Query;

/// Status filter for `pet/findByStatus`. Defaults to `available` only.
#[derive(Clone, Debug)]
pub struct StatusQuery {
    pub statuses: Vec<PetStatus>,
}

impl Default for StatusQuery {
    fn default() -> Self {
        Self {
            statuses: vec![PetStatus::Available],
        }
    }
}

impl Query for StatusQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for status in &self.statuses {
            url.query_pairs_mut()
                .append_pair("status", &status.to_string());
        }
        url
    }
}
