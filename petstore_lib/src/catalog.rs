//! Fail-soft wrapper around the pet-store API client.
//!
//! Reads never fail: transport errors and bad statuses are logged and turn
//! into empty or absent results. Mutations return typed errors so callers
//! can decide whether to touch session state.

use petstore_api::types::{PetID, PetPayload};
use petstore_api::{Client, StatusQuery};

use crate::config::CatalogConfig;
use crate::error::PetStoreError;
use crate::record::PetRecord;

/// Outcome of fetching one pet.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    Found(PetRecord),
    /// The store answered 404.
    Absent,
    /// The store could not be reached or answered something unusable.
    Unavailable,
}

impl Lookup {
    pub fn into_record(self) -> Option<PetRecord> {
        match self {
            Lookup::Found(record) => Some(record),
            Lookup::Absent | Lookup::Unavailable => None,
        }
    }
}

/// Successful delete outcomes. Both mean the pet is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

/// Remote catalog access with the error policy applied.
pub struct RemoteCatalogClient {
    inner: Client,
}

impl RemoteCatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: config.client(),
        }
    }

    /// Creates a catalog client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(&CatalogConfig::default().with_base_url(base_url))
    }

    /// All pets with status `available`. Empty on any failure.
    pub async fn find_available(&self) -> Vec<PetRecord> {
        match self.inner.find_by_status(&StatusQuery::default()).await {
            Ok(raw) => {
                let records = PetRecord::collection(raw);
                tracing::info!("[API RESPONSE] Total pets fetched: {}", records.len());
                records
            }
            Err(e) => {
                tracing::error!("[API ERROR] Error fetching available pets: {}", e);
                Vec::new()
            }
        }
    }

    /// One pet by id. A 404 is [`Lookup::Absent`], not an error.
    pub async fn get_by_id(&self, id: PetID) -> Lookup {
        match self.inner.get_pet(id).await {
            Ok(raw) => match PetRecord::from_raw(raw) {
                Some(record) => Lookup::Found(record),
                None => {
                    tracing::warn!("[API WARNING] Pet ID {} came back without an id", id);
                    Lookup::Absent
                }
            },
            Err(e) if e.is_not_found() => {
                tracing::warn!("[API WARNING] Pet ID {} not found in API.", id);
                Lookup::Absent
            }
            Err(e) => {
                tracing::error!("[API ERROR] Error fetching pet ID {}: {}", id, e);
                Lookup::Unavailable
            }
        }
    }

    /// Creates a pet and returns the stored record.
    ///
    /// If the echoed body omits the id, the id that was sent is used.
    pub async fn create(&self, payload: &PetPayload) -> Result<PetRecord, PetStoreError> {
        tracing::info!("[API REQUEST] Adding pet {} ({})", payload.id, payload.name);
        let raw = self.inner.create_pet(payload).await.map_err(|e| {
            tracing::error!("[API ERROR] Error adding pet: {}", e);
            PetStoreError::CreateFailed(e)
        })?;
        let id = raw.id.unwrap_or(payload.id);
        tracing::info!("[API RESPONSE] Pet added with ID {}", id);
        Ok(PetRecord::with_id(id, raw))
    }

    pub async fn update(&self, payload: &PetPayload) -> Result<(), PetStoreError> {
        tracing::info!("[API REQUEST] Updating pet ID {}", payload.id);
        self.inner.update_pet(payload).await.map_err(|e| {
            tracing::error!("[API ERROR] Error updating pet ID {}: {}", payload.id, e);
            PetStoreError::UpdateFailed {
                id: payload.id,
                source: e,
            }
        })?;
        tracing::info!("[API RESPONSE] Pet ID {} updated successfully.", payload.id);
        Ok(())
    }

    /// Deletes a pet. A 404 counts as success.
    pub async fn delete(&self, id: PetID) -> Result<DeleteOutcome, PetStoreError> {
        tracing::info!("[API REQUEST] Deleting pet ID {}", id);
        match self.inner.delete_pet(id).await {
            Ok(()) => {
                tracing::info!("[API RESPONSE] Pet ID {} deleted successfully.", id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    "[API WARNING] Pet ID {} not found (404). Assuming it's already deleted.",
                    id
                );
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(e) => {
                tracing::error!("[API ERROR] Error deleting pet ID {}: {}", id, e);
                Err(PetStoreError::DeleteFailed { id, source: e })
            }
        }
    }
}
