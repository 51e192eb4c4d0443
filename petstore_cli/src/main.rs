mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use petstore_lib::{CatalogConfig, FileSession, ListingOrchestrator, RemoteCatalogClient};

use crate::output::OutputFormat;

const SESSION_FILE_VAR: &str = "PETSTORE_SESSION_FILE";
const DEFAULT_SESSION_FILE: &str = "petstore-session.json";

#[derive(Parser)]
#[command(name = "petstore")]
#[command(about = "Browse and manage pets in a remote pet store")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Session file tracking the pets you added (default: $PETSTORE_SESSION_FILE or ./petstore-session.json)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Pet store base URL (default: $PETSTORE_BASE_URL or the public Swagger pet store)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your pets or every available pet
    List(commands::list::ListArgs),
    /// Show a single pet by ID
    Show(commands::show::ShowArgs),
    /// Add a pet and track it in your session
    Add(commands::add::AddArgs),
    /// Update a pet's fields
    Update(commands::update::UpdateArgs),
    /// Delete a pet and stop tracking it
    Remove(commands::remove::RemoveArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("petstore=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let mut config = CatalogConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let orchestrator = ListingOrchestrator::new(RemoteCatalogClient::new(&config));

    let session_path = cli
        .session
        .clone()
        .or_else(|| std::env::var(SESSION_FILE_VAR).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    let mut session = FileSession::load(&session_path)?;

    match &cli.command {
        Commands::List(args) => {
            commands::list::run(args, &orchestrator, &mut session, &format).await?
        }
        Commands::Show(args) => commands::show::run(args, &orchestrator, &format).await?,
        Commands::Add(args) => {
            commands::add::run(args, &orchestrator, &mut session, &format).await?
        }
        Commands::Update(args) => {
            commands::update::run(args, &orchestrator, &mut session, &format).await?
        }
        Commands::Remove(args) => {
            commands::remove::run(args, &orchestrator, &mut session, &format).await?
        }
    }

    Ok(())
}
