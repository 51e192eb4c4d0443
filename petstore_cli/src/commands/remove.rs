use anyhow::Result;
use clap::Args;
use petstore_lib::{DeleteOutcome, FileSession, ListingOrchestrator, Mutation};

use super::finish_mutation;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct RemoveArgs {
    /// Pet ID
    pub id: i64,
}

pub async fn run(
    args: &RemoveArgs,
    orchestrator: &ListingOrchestrator,
    session: &mut FileSession,
    format: &OutputFormat,
) -> Result<()> {
    let result = orchestrator.remove(session, args.id).await;
    if let Ok(DeleteOutcome::AlreadyAbsent) = &result {
        eprintln!("Pet {} was already gone from the store", args.id);
    }
    finish_mutation(Mutation::Remove, result, orchestrator, session, format).await
}
