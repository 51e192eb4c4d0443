//! CLI subcommand implementations.

pub mod add;
pub mod list;
pub mod remove;
pub mod show;
pub mod update;

use anyhow::{bail, Result};
use clap::Args;
use petstore_lib::validation::PetFormInput;
use petstore_lib::{FileSession, ListingOrchestrator, Mutation, PageRequest, PetStoreError};

use crate::output::{print_listing, OutputFormat};

/// Fields shared by `add` and `update`.
#[derive(Args)]
pub struct PetFormArgs {
    /// Pet name
    #[arg(long)]
    pub name: String,

    /// Status: available, pending, sold
    #[arg(long, default_value = "available")]
    pub status: String,

    /// Category ID (random 1-10 when omitted)
    #[arg(long)]
    pub category_id: Option<i64>,

    /// Category name (defaults to "General")
    #[arg(long)]
    pub category_name: Option<String>,

    /// Photo URL; repeat for several
    #[arg(long = "photo-url")]
    pub photo_urls: Vec<String>,

    /// Tag name; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl PetFormArgs {
    pub fn to_input(&self) -> PetFormInput {
        PetFormInput {
            name: self.name.clone(),
            status: self.status.clone(),
            category_id: self.category_id,
            category_name: self.category_name.clone(),
            photo_urls: self.photo_urls.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Reports a mutation the way a redirect back to the listing would: on
/// success the session is saved and the first page of "my pets" is shown
/// with the flash; on failure only the flash is reported.
pub async fn finish_mutation<T>(
    mutation: Mutation,
    result: Result<T, PetStoreError>,
    orchestrator: &ListingOrchestrator,
    session: &mut FileSession,
    format: &OutputFormat,
) -> Result<()> {
    let flash = mutation.flash(&result);
    if result.is_err() {
        bail!("{}", flash.message());
    }
    session.save()?;

    let view = orchestrator
        .list(session, &PageRequest::default())
        .await
        .with_flash(flash);
    print_listing(&view, format)
}
