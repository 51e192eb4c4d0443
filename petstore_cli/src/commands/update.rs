use anyhow::Result;
use clap::Args;
use petstore_lib::validation;
use petstore_lib::{FileSession, ListingOrchestrator, Mutation};

use super::{finish_mutation, PetFormArgs};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct UpdateArgs {
    /// Pet ID
    pub id: i64,

    #[command(flatten)]
    pub form: PetFormArgs,
}

pub async fn run(
    args: &UpdateArgs,
    orchestrator: &ListingOrchestrator,
    session: &mut FileSession,
    format: &OutputFormat,
) -> Result<()> {
    let form = validation::validate_pet_form(&args.form.to_input())?;
    let result = orchestrator.update(args.id, &form).await;
    finish_mutation(Mutation::Update, result, orchestrator, session, format).await
}
