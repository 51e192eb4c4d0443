//! Error types for the library layer.

use std::fmt;

use petstore_api::types::PetID;

use crate::session::SessionError;

/// Errors produced by the library layer.
///
/// Read paths never produce these; they degrade to empty or absent results
/// inside [`crate::RemoteCatalogClient`]. Mutations and input validation do.
#[derive(Debug)]
pub enum PetStoreError {
    /// An error from the underlying API client.
    Api(petstore_api::Error),
    /// The remote store rejected or never answered a create.
    CreateFailed(petstore_api::Error),
    /// The remote store rejected or never answered an update.
    UpdateFailed {
        id: PetID,
        source: petstore_api::Error,
    },
    /// A delete failed for a reason other than the pet already being gone.
    DeleteFailed {
        id: PetID,
        source: petstore_api::Error,
    },
    /// The pet does not exist in the remote store.
    NotFound(PetID),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// Session state could not be loaded or saved.
    Session(SessionError),
}

impl fmt::Display for PetStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::CreateFailed(e) => write!(f, "Create failed: {}", e),
            Self::UpdateFailed { id, source } => {
                write!(f, "Update of pet {} failed: {}", id, source)
            }
            Self::DeleteFailed { id, source } => {
                write!(f, "Delete of pet {} failed: {}", id, source)
            }
            Self::NotFound(id) => write!(f, "Pet with ID {} not found.", id),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Session(e) => write!(f, "Session error: {}", e),
        }
    }
}

impl std::error::Error for PetStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) | Self::CreateFailed(e) => Some(e),
            Self::UpdateFailed { source, .. } | Self::DeleteFailed { source, .. } => Some(source),
            Self::Serialization(e) => Some(e),
            Self::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl From<petstore_api::Error> for PetStoreError {
    fn from(e: petstore_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for PetStoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<SessionError> for PetStoreError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}
