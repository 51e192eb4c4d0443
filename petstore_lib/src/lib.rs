//! Library layer for the pet catalog: record normalization, pagination,
//! session-tracked "my pets" and the listing orchestrator.
//!
//! Wraps the `petstore_api` crate with fail-soft read paths, typed mutation
//! errors and reconciliation of session-tracked IDs against the remote store.

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod listing;
pub mod pagination;
pub mod record;
pub mod session;
pub mod validation;

pub use petstore_api;
pub use petstore_api::types;

pub use catalog::{DeleteOutcome, Lookup, RemoteCatalogClient};
pub use config::CatalogConfig;
pub use error::PetStoreError;
pub use form::PetForm;
pub use listing::{Flash, ListingOrchestrator, ListingView, Mutation, Reconciliation};
pub use pagination::{paginate, Filter, PageRequest, PageResult};
pub use record::{PetRecord, PetTag};
pub use session::{
    FileSession, MemorySession, SessionError, SessionIdTracker, SessionStore, SessionTrackedIds,
    TrackedEntry,
};
