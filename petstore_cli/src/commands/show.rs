use anyhow::Result;
use clap::Args;
use petstore_lib::ListingOrchestrator;

use crate::output::{print_pet, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// Pet ID
    pub id: i64,
}

pub async fn run(
    args: &ShowArgs,
    orchestrator: &ListingOrchestrator,
    format: &OutputFormat,
) -> Result<()> {
    let pet = orchestrator.show(args.id).await?;
    print_pet(&pet, format)
}
