//! Stagehand CLI - Database migrations and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! stagehand migrate
//!
//! # Load a category tree from YAML, replacing what is there
//! stagehand seed catalog crates/cli/seed/catalog.yaml --clear
//!
//! # Check a catalog file and preview its menu
//! stagehand seed catalog crates/cli/seed/catalog.yaml --dry-run
//!
//! # Print the navigation menu as the storefront would build it
//! stagehand categories tree
//!
//! # Reorder the children of rental/led-screen
//! stagehand categories reorder rental/led-screen outdoor indoor
//!
//! # Reorder the root categories
//! stagehand categories reorder / fixed rental
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(author, version, about = "Stagehand CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run catalog database migrations
    Migrate,
    /// Seed the database from YAML files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect and manage the category tree
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Load a category tree with products
    Catalog {
        /// Path to the YAML catalog file
        file: String,

        /// Delete all existing categories and products first
        #[arg(long)]
        clear: bool,

        /// Validate and print the resulting menu without touching the database
        #[arg(long, conflicts_with = "clear")]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum CategoriesAction {
    /// Print the navigation menu tree
    Tree,
    /// Set the display order of sibling categories
    Reorder {
        /// Slug path of the parent category, or `/` for the roots
        parent: String,

        /// Every child slug, in the new order
        #[arg(required = true)]
        slugs: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Catalog {
                file,
                clear,
                dry_run,
            } => {
                commands::seed::catalog(&file, clear, dry_run).await?;
            }
        },
        Commands::Categories { action } => match action {
            CategoriesAction::Tree => commands::categories::tree().await?,
            CategoriesAction::Reorder { parent, slugs } => {
                commands::categories::reorder(&parent, &slugs).await?;
            }
        },
    }
    Ok(())
}
