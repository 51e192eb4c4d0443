//! The listing orchestrator: picks a source, fetches, reconciles the session's
//! tracked ids against what came back, then searches and paginates.

use petstore_api::types::PetID;
use serde::Serialize;

use crate::catalog::{DeleteOutcome, Lookup, RemoteCatalogClient};
use crate::error::PetStoreError;
use crate::form::{new_pet_id, PetForm};
use crate::pagination::{paginate, Filter, PageRequest, PageResult};
use crate::record::PetRecord;
use crate::session::{SessionIdTracker, SessionStore, SessionTrackedIds, TrackedEntry};

/// User-facing note left by a mutation. Never carries error detail.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn message(&self) -> &str {
        match self {
            Flash::Success(msg) | Flash::Error(msg) => msg.as_str(),
        }
    }
}

/// The mutations a user can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Add,
    Update,
    Remove,
}

impl Mutation {
    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::Add => "Pet added successfully!",
            Mutation::Update => "Pet updated successfully!",
            Mutation::Remove => "Pet deleted successfully!",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Mutation::Add => "Error adding pet.",
            Mutation::Update => "Error updating pet.",
            Mutation::Remove => "Error deleting pet.",
        }
    }

    /// Flash for the outcome of this mutation, logging the failure detail.
    pub fn flash<T>(&self, result: &Result<T, PetStoreError>) -> Flash {
        match result {
            Ok(_) => {
                tracing::info!("[SUCCESS] {}", self.success_message());
                Flash::Success(self.success_message().to_string())
            }
            Err(e) => {
                tracing::error!("[ERROR] {}: {}", self.error_message(), e);
                Flash::Error(self.error_message().to_string())
            }
        }
    }
}

/// What the presentation layer renders for one listing request.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    #[serde(flatten)]
    pub page: PageResult,
    pub filter: Filter,
    pub search: String,
    pub limit: usize,
    /// Set when tracked ids are missing from the remote store.
    pub warning: Option<String>,
    pub flash: Option<Flash>,
}

impl ListingView {
    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }
}

/// Tracked ids compared against the records the store actually returned.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
    pub tracked: usize,
    pub fetched: usize,
    /// Tracked entries with no returned record, in tracked order.
    pub missing: Vec<TrackedEntry>,
}

impl Reconciliation {
    pub fn compute(tracked: &SessionTrackedIds, records: &[PetRecord]) -> Self {
        let missing = tracked
            .entries()
            .iter()
            .filter(|entry| match entry.id() {
                Some(id) => !records.iter().any(|record| record.id == id),
                None => true,
            })
            .cloned()
            .collect();
        Self {
            tracked: tracked.len(),
            fetched: records.len(),
            missing,
        }
    }

    /// One-line advisory, or `None` when nothing is missing.
    pub fn warning(&self) -> Option<String> {
        if self.missing.is_empty() {
            return None;
        }
        Some(format!(
            "Fetched {} of {} tracked pets; missing IDs: [{}]",
            self.fetched,
            self.tracked,
            self.missing
                .iter()
                .map(|entry| entry.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

/// Composes the catalog, the session tracker and pagination.
pub struct ListingOrchestrator {
    catalog: RemoteCatalogClient,
}

impl ListingOrchestrator {
    pub fn new(catalog: RemoteCatalogClient) -> Self {
        Self { catalog }
    }

    /// Builds the listing for `request`.
    ///
    /// Never fails: remote errors show up as fewer records, and missing
    /// tracked ids as a warning on the view.
    pub async fn list<S: SessionStore>(
        &self,
        session: &mut S,
        request: &PageRequest,
    ) -> ListingView {
        let (records, warning) = match request.filter {
            Filter::All => {
                tracing::info!("[API REQUEST] Fetching all pets from API...");
                (self.catalog.find_available().await, None)
            }
            Filter::My => {
                let tracked = SessionIdTracker::new(session).load();
                let records = self.fetch_tracked(&tracked).await;
                let warning = Reconciliation::compute(&tracked, &records).warning();
                if let Some(warning) = &warning {
                    tracing::warn!("[RECONCILIATION] {}", warning);
                }
                (records, warning)
            }
        };

        ListingView {
            page: paginate(records, &request.search, request.limit, request.page),
            filter: request.filter,
            search: request.search.clone(),
            limit: request.limit,
            warning,
            flash: None,
        }
    }

    /// Fetches tracked pets one at a time, in tracked order.
    async fn fetch_tracked(&self, tracked: &SessionTrackedIds) -> Vec<PetRecord> {
        if tracked.is_empty() {
            tracing::warn!("[WARNING] No pet IDs provided to fetch.");
            return Vec::new();
        }

        let mut records = Vec::new();
        for entry in tracked.entries() {
            let Some(id) = entry.id() else {
                tracing::warn!("[WARNING] Skipping invalid pet ID: {}", entry);
                continue;
            };
            if let Some(record) = self.catalog.get_by_id(id).await.into_record() {
                records.push(record);
            }
        }
        records
    }

    /// One pet, for display or to prefill an edit.
    pub async fn show(&self, id: PetID) -> Result<PetRecord, PetStoreError> {
        match self.catalog.get_by_id(id).await {
            Lookup::Found(record) => Ok(record),
            Lookup::Absent => Err(PetStoreError::NotFound(id)),
            Lookup::Unavailable => Err(PetStoreError::Api(petstore_api::Error::RequestFailed)),
        }
    }

    /// Creates a pet and, only if that succeeds, tracks its id in the session.
    pub async fn add<S: SessionStore>(
        &self,
        session: &mut S,
        form: &PetForm,
    ) -> Result<PetRecord, PetStoreError> {
        let payload = {
            let mut rng = rand::thread_rng();
            form.to_payload(new_pet_id(&mut rng), &mut rng)
        };
        let record = self.catalog.create(&payload).await?;

        let mut tracker = SessionIdTracker::new(session);
        let mut tracked = tracker.load();
        tracked.push(record.id);
        tracker.save(&tracked);
        Ok(record)
    }

    /// Replaces a pet's fields. Session state is not touched.
    pub async fn update(&self, id: PetID, form: &PetForm) -> Result<(), PetStoreError> {
        let payload = {
            let mut rng = rand::thread_rng();
            form.to_payload(id, &mut rng)
        };
        self.catalog.update(&payload).await
    }

    /// Deletes a pet and untracks it. On a real failure the session is left alone.
    pub async fn remove<S: SessionStore>(
        &self,
        session: &mut S,
        id: PetID,
    ) -> Result<DeleteOutcome, PetStoreError> {
        let outcome = self.catalog.delete(id).await?;

        let mut tracker = SessionIdTracker::new(session);
        let mut tracked = tracker.load();
        if tracked.remove(id) {
            tracker.save(&tracked);
            tracing::info!("[SESSION UPDATE] Removed pet ID {} from session.", id);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use petstore_api::types::PetStatus;
    use serde_json::json;

    use super::*;

    fn pet(id: i64) -> PetRecord {
        PetRecord {
            id,
            name: format!("Pet {}", id),
            status: PetStatus::Available,
            category_id: None,
            category_name: None,
            photo_urls: vec![],
            tags: vec![],
        }
    }

    #[test]
    fn reconciliation_reports_missing_in_order() {
        let tracked = SessionTrackedIds::from_ids([1, 2, 3]);
        let result = Reconciliation::compute(&tracked, &[pet(1), pet(3)]);
        assert_eq!(result.missing, vec![TrackedEntry::Id(2)]);
        assert_eq!(
            result.warning().unwrap(),
            "Fetched 2 of 3 tracked pets; missing IDs: [2]"
        );
    }

    #[test]
    fn reconciliation_counts_invalid_entries_as_missing() {
        let tracked = SessionTrackedIds::new(vec![
            TrackedEntry::Invalid(json!("abc")),
            TrackedEntry::Id(4),
        ]);
        let result = Reconciliation::compute(&tracked, &[pet(4)]);
        assert_eq!(result.missing.len(), 1);
        assert_eq!(
            result.warning().unwrap(),
            "Fetched 1 of 2 tracked pets; missing IDs: [abc]"
        );
    }

    #[test]
    fn nothing_missing_means_no_warning() {
        let tracked = SessionTrackedIds::from_ids([7]);
        assert_eq!(Reconciliation::compute(&tracked, &[pet(7)]).warning(), None);
        assert_eq!(
            Reconciliation::compute(&SessionTrackedIds::default(), &[]).warning(),
            None
        );
    }

    #[test]
    fn flash_hides_error_detail() {
        let failed: Result<(), PetStoreError> = Err(PetStoreError::CreateFailed(
            petstore_api::Error::HttpStatus {
                status: 500,
                body: "stack trace".to_string(),
            },
        ));
        assert_eq!(
            Mutation::Add.flash(&failed),
            Flash::Error("Error adding pet.".to_string())
        );
        assert_eq!(
            Mutation::Remove.flash(&Ok::<_, PetStoreError>(())),
            Flash::Success("Pet deleted successfully!".to_string())
        );
    }

    #[test]
    fn view_serializes_flat() {
        let view = ListingView {
            page: PageResult::empty(10, 1),
            filter: Filter::My,
            search: String::new(),
            limit: 10,
            warning: None,
            flash: None,
        }
        .with_flash(Flash::Success("Pet added successfully!".to_string()));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["lastPage"], 1);
        assert_eq!(json["filter"], "my");
        assert_eq!(json["flash"]["kind"], "success");
    }
}
