use anyhow::Result;
use clap::Args;
use petstore_lib::validation;
use petstore_lib::{FileSession, ListingOrchestrator};

use crate::output::{print_listing, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Which pets to list: my (added in this session) or all (every available pet)
    #[arg(long, default_value = "my")]
    pub filter: String,

    /// Case-insensitive name search
    #[arg(long, default_value = "")]
    pub search: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub limit: i64,
}

pub async fn run(
    args: &ListArgs,
    orchestrator: &ListingOrchestrator,
    session: &mut FileSession,
    format: &OutputFormat,
) -> Result<()> {
    let request =
        validation::validate_page_request(args.limit, args.page, &args.search, &args.filter)?;

    let view = orchestrator.list(session, &request).await;
    // Listing may have repaired a malformed tracked list.
    session.save()?;

    print_listing(&view, format)
}
