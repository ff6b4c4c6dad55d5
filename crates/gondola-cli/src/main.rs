mod list;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::list::ListCommands;

#[derive(Debug, Parser)]
#[command(name = "gondola")]
#[command(about = "Search supermarket storefronts and keep a shopping list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every configured storefront (or the ones named) for a product
    Search {
        /// Product to search for
        term: String,
        /// Only search this source; repeat for several
        #[arg(long = "source")]
        sources: Vec<String>,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the configured storefronts
    Sources,
    /// Manage the shopping list
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = gondola_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, sources_path = %config.sources_path.display(), "configuration loaded");

    match cli.command {
        Commands::Search {
            term,
            sources,
            json,
        } => search::run_search(&config, &term, &sources, json).await,
        Commands::Sources => search::run_sources(&config),
        Commands::List { command } => list::run_list(&config, command),
    }
}
