//! Pet-related types as they travel over the wire.
//!
//! The remote store is loose about what it returns: fields go missing, come
//! back as `null`, or carry the wrong JSON type. [`RawPet`] therefore accepts
//! anything per field and falls back to the field's default instead of
//! rejecting the whole record.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

extern crate serde_json;

/// Numeric identifier for a pet.
pub type PetID = i64;

/// Lifecycle status of a pet in the store.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl std::fmt::Display for PetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PetStatus::Available => "available",
                PetStatus::Pending => "pending",
                PetStatus::Sold => "sold",
            }
        )
    }
}

impl FromStr for PetStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(PetStatus::Available),
            "pending" => Ok(PetStatus::Pending),
            "sold" => Ok(PetStatus::Sold),
            _ => Err(()),
        }
    }
}

/// Category a pet belongs to.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Free-form label attached to a pet.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Tag {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A pet record exactly as the remote API returned it.
///
/// Every field is optional. Normalizing into something callers can rely on is
/// the job of the library layer.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawPet {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<PetID>,

    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Status string. Kept as text so unknown values survive deserialization.
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<Category>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub photo_urls: Vec<String>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub tags: Vec<Tag>,
}

/// Full pet body sent on `POST /pet` and `PUT /pet`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetPayload {
    pub id: PetID,
    pub category: Category,
    pub name: String,
    pub photo_urls: Vec<String>,
    pub tags: Vec<Tag>,
    pub status: PetStatus,
}

/// Deserializes a field, substituting the default when the JSON has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`] for sequences, but drops bad elements one at a time.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_values() {
        assert_eq!("pending".parse::<PetStatus>(), Ok(PetStatus::Pending));
        assert!("adopted".parse::<PetStatus>().is_err());
        assert_eq!(PetStatus::Sold.to_string(), "sold");
    }

    #[test]
    fn raw_pet_survives_wrong_field_types() {
        let raw: RawPet = serde_json::from_str(
            r#"{"id": 7, "name": 42, "category": "dogs", "photoUrls": "nope", "tags": [{"id": 1, "name": "calm"}, 5]}"#,
        )
        .unwrap();
        assert_eq!(raw.id, Some(7));
        assert_eq!(raw.name, None);
        assert_eq!(raw.category, None);
        assert!(raw.photo_urls.is_empty());
        assert_eq!(raw.tags.len(), 1);
        assert_eq!(raw.tags[0].name.as_deref(), Some("calm"));
    }

    #[test]
    fn raw_pet_accepts_nulls_and_missing_fields() {
        let raw: RawPet = serde_json::from_str(r#"{"id": 3, "status": null}"#).unwrap();
        assert_eq!(raw.id, Some(3));
        assert_eq!(raw.status, None);
        assert!(raw.tags.is_empty());
    }

    #[test]
    fn payload_serializes_camel_case() {
        let payload = PetPayload {
            id: 1,
            category: Category {
                id: Some(2),
                name: Some("General".to_string()),
            },
            name: "Rex".to_string(),
            photo_urls: vec!["https://example.com/default.jpg".to_string()],
            tags: vec![],
            status: PetStatus::Available,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["photoUrls"][0], "https://example.com/default.jpg");
        assert_eq!(json["status"], "available");
        assert_eq!(json["category"]["name"], "General");
    }
}
