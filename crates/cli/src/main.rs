//! StockInvent CLI - Product store maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Create data/products.json with the sample catalogue
//! stockinvent-cli seed
//!
//! # Overwrite an existing catalogue
//! stockinvent-cli seed --force
//!
//! # List products, optionally filtered
//! stockinvent-cli products list --search chair --category Furniture
//!
//! # Archive products with zero stock for over 90 days
//! stockinvent-cli archive sweep --dry-run
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "stockinvent-cli")]
#[command(author, version, about = "StockInvent CLI tools")]
struct Cli {
    /// Directory holding products.json
    #[arg(long, env = "STOCKINVENT_DATA_DIR", default_value = "./data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the product store with the sample catalogue
    Seed {
        /// Overwrite an existing catalogue
        #[arg(long)]
        force: bool,
    },
    /// Inspect products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Archive maintenance
    Archive {
        #[command(subcommand)]
        action: ArchiveAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Match name, SKU or supplier
        #[arg(short, long, default_value = "")]
        search: String,

        /// Restrict to one category
        #[arg(short, long, default_value = "")]
        category: String,
    },
}

#[derive(Subcommand)]
enum ArchiveAction {
    /// Archive products with zero stock for over 90 days
    Sweep {
        /// Only report what would be archived
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { force } => {
            commands::seed::products(&cli.data_dir, force).await?;
        }
        Commands::Products { action } => match action {
            ProductsAction::List { search, category } => {
                commands::products::list(&cli.data_dir, &search, &category).await?;
            }
        },
        Commands::Archive { action } => match action {
            ArchiveAction::Sweep { dry_run } => {
                commands::archive::sweep(&cli.data_dir, dry_run).await?;
            }
        },
    }
    Ok(())
}
