use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vendcat::error::AppError;

use crate::demo::{run_browse, run_demo, BrowseArgs, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Vending Catalog Service",
    about = "Browse, price, and curate the vending product catalog from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Catalog queries for operator demos and spot checks
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Run an end-to-end CLI demo covering browsing, curation, and export
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Filter and sort the catalog, printing the projected page
    Browse(BrowseArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Product list JSON file (falls back to APP_PRODUCTS_FILE, then demo data)
    #[arg(long)]
    pub(crate) products: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog {
            command: CatalogCommand::Browse(args),
        } => run_browse(args),
        Command::Demo(args) => run_demo(args),
    }
}
