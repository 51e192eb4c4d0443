//! Canonical in-memory pet record and the one mapping from wire shape into it.

use petstore_api::types::{PetID, PetStatus, RawPet};
use serde::{Deserialize, Serialize};

/// Name given to records whose remote name is missing or blank.
pub const UNNAMED: &str = "(unnamed)";

/// A tag after normalization. Tags without a name are dropped.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PetTag {
    pub id: i64,
    pub name: String,
}

/// A pet as the rest of the crate sees it, whichever endpoint it came from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    pub id: PetID,
    /// Never empty.
    pub name: String,
    pub status: PetStatus,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub photo_urls: Vec<String>,
    pub tags: Vec<PetTag>,
}

impl PetRecord {
    /// Normalizes a raw API record.
    ///
    /// Returns `None` only when the record has no id, since nothing can key
    /// it. Every other missing or malformed field gets a default.
    pub fn from_raw(raw: RawPet) -> Option<Self> {
        let Some(id) = raw.id else {
            tracing::warn!("Dropping pet record without an id (name: {:?})", raw.name);
            return None;
        };
        Some(Self::with_id(id, raw))
    }

    /// Normalizes a raw API record under `id`, ignoring whatever id it carries.
    pub fn with_id(id: PetID, raw: RawPet) -> Self {
        let name = raw
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNNAMED.to_string());

        let status = match raw.status.as_deref().map(str::parse::<PetStatus>) {
            Some(Ok(status)) => status,
            _ => {
                tracing::warn!(
                    "Pet {} has unrecognized status {:?}, treating as available",
                    id,
                    raw.status
                );
                PetStatus::Available
            }
        };

        let (category_id, category_name) = match raw.category {
            Some(category) => (category.id, category.name),
            None => (None, None),
        };

        let tags = raw
            .tags
            .into_iter()
            .filter_map(|tag| {
                tag.name.map(|name| PetTag {
                    id: tag.id.unwrap_or_default(),
                    name,
                })
            })
            .collect();

        Self {
            id,
            name,
            status,
            category_id,
            category_name,
            photo_urls: raw.photo_urls,
            tags,
        }
    }

    /// Normalizes a batch, dropping records that cannot be keyed.
    pub fn collection(raw: Vec<RawPet>) -> Vec<Self> {
        raw.into_iter().filter_map(Self::from_raw).collect()
    }
}
