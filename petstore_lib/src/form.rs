//! Validated create/update input and the request bodies built from it.

use petstore_api::types::{Category, PetID, PetPayload, PetStatus, Tag};
use rand::Rng;

pub const DEFAULT_CATEGORY_NAME: &str = "General";
pub const DEFAULT_PHOTO_URL: &str = "https://example.com/default.jpg";
pub const DEFAULT_TAG_NAME: &str = "friendly";

/// Range new pet ids are drawn from. The remote store does not assign ids,
/// and nothing checks the draw against existing pets.
const NEW_ID_RANGE: std::ops::RangeInclusive<PetID> =
    111_111_111_111_111_111..=999_999_999_999_999_999;

/// Fields of a pet as submitted by a user, already validated.
///
/// Build with [`crate::validation::validate_pet_form`].
#[derive(Clone, Debug, PartialEq)]
pub struct PetForm {
    pub name: String,
    pub status: PetStatus,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    /// Tag names; ids are assigned when the payload is built.
    pub tags: Option<Vec<String>>,
}

impl PetForm {
    pub fn new(name: &str, status: PetStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
            category_id: None,
            category_name: None,
            photo_urls: None,
            tags: None,
        }
    }

    /// Builds the full body for `id`, filling omitted fields with defaults.
    pub fn to_payload(&self, id: PetID, rng: &mut impl Rng) -> PetPayload {
        let category = Category {
            id: Some(self.category_id.unwrap_or_else(|| rng.gen_range(1..=10))),
            name: Some(
                self.category_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CATEGORY_NAME.to_string()),
            ),
        };
        let photo_urls = self
            .photo_urls
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_PHOTO_URL.to_string()]);
        let tags = match &self.tags {
            Some(names) => names
                .iter()
                .enumerate()
                .map(|(i, name)| Tag {
                    id: Some(i as i64 + 1),
                    name: Some(name.clone()),
                })
                .collect(),
            None => vec![Tag {
                id: Some(rng.gen_range(1..=10)),
                name: Some(DEFAULT_TAG_NAME.to_string()),
            }],
        };

        PetPayload {
            id,
            category,
            name: self.name.clone(),
            photo_urls,
            tags,
            status: self.status,
        }
    }
}

/// Draws an id for a pet about to be created.
pub fn new_pet_id(rng: &mut impl Rng) -> PetID {
    rng.gen_range(NEW_ID_RANGE)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn defaults_fill_omitted_fields() {
        let mut rng = StdRng::seed_from_u64(7);
        let payload = PetForm::new("Rex", PetStatus::Pending).to_payload(42, &mut rng);

        assert_eq!(payload.id, 42);
        assert_eq!(payload.name, "Rex");
        assert_eq!(payload.status, PetStatus::Pending);
        assert_eq!(payload.category.name.as_deref(), Some(DEFAULT_CATEGORY_NAME));
        assert!((1..=10).contains(&payload.category.id.unwrap()));
        assert_eq!(payload.photo_urls, vec![DEFAULT_PHOTO_URL.to_string()]);
        assert_eq!(payload.tags.len(), 1);
        assert_eq!(payload.tags[0].name.as_deref(), Some(DEFAULT_TAG_NAME));
    }

    #[test]
    fn given_fields_are_kept() {
        let mut rng = StdRng::seed_from_u64(7);
        let form = PetForm {
            category_id: Some(3),
            category_name: Some("Cats".to_string()),
            photo_urls: Some(vec![]),
            tags: Some(vec!["calm".to_string(), "indoor".to_string()]),
            ..PetForm::new("Tom", PetStatus::Sold)
        };
        let payload = form.to_payload(9, &mut rng);

        assert_eq!(payload.category.id, Some(3));
        assert_eq!(payload.category.name.as_deref(), Some("Cats"));
        assert!(payload.photo_urls.is_empty());
        assert_eq!(payload.tags[1].id, Some(2));
        assert_eq!(payload.tags[1].name.as_deref(), Some("indoor"));
    }

    #[test]
    fn new_ids_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(NEW_ID_RANGE.contains(&new_pet_id(&mut rng)));
        }
    }
}
