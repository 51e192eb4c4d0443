mod pet;
pub use self::pet::{Category, PetID, PetPayload, PetStatus, RawPet, Tag};
