use anyhow::Result;
use clap::Args;
use petstore_lib::validation;
use petstore_lib::{FileSession, ListingOrchestrator, Mutation};

use super::{finish_mutation, PetFormArgs};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub form: PetFormArgs,
}

pub async fn run(
    args: &AddArgs,
    orchestrator: &ListingOrchestrator,
    session: &mut FileSession,
    format: &OutputFormat,
) -> Result<()> {
    let form = validation::validate_pet_form(&args.form.to_input())?;
    let result = orchestrator.add(session, &form).await;
    if let Ok(pet) = &result {
        eprintln!("Added pet {} ({})", pet.id, pet.name);
    }
    finish_mutation(Mutation::Add, result, orchestrator, session, format).await
}
