use petstore_api::types::{PetStatus, RawPet};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_pet_full() {
    let json = load_fixture("pet.json");
    let pet: RawPet = serde_json::from_str(&json).unwrap();
    assert_eq!(pet.id, Some(101));
    assert_eq!(pet.name.as_deref(), Some("Rex"));
    assert_eq!(pet.status.as_deref(), Some("available"));
    let category = pet.category.unwrap();
    assert_eq!(category.id, Some(1));
    assert_eq!(category.name.as_deref(), Some("Dogs"));
    assert_eq!(pet.photo_urls, vec!["https://example.com/rex.jpg"]);
    assert_eq!(pet.tags[0].name.as_deref(), Some("friendly"));
}

#[test]
fn deserialize_pet_malformed_fields_degrade() {
    let json = load_fixture("pet_malformed.json");
    let pet: RawPet = serde_json::from_str(&json).unwrap();
    assert_eq!(pet.id, Some(104));
    assert_eq!(pet.name.as_deref(), Some("Tom"));
    assert!(pet.category.is_none());
    assert!(pet.photo_urls.is_empty());
    assert_eq!(pet.tags.len(), 1);
    assert_eq!(pet.status.as_deref(), Some("adopted"));
    assert!(pet.status.unwrap().parse::<PetStatus>().is_err());
}

#[test]
fn deserialize_available_list_skips_nothing_at_type_level() {
    let json = load_fixture("pets_available.json");
    let items: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(items.len(), 4);
    let pets: Vec<RawPet> = items
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    assert_eq!(pets.len(), 3);
    assert_eq!(pets[2].name.as_deref(), Some("Goldie"));
    assert!(pets[2].category.is_none());
}
