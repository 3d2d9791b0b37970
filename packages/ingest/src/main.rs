#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the club network content seeding tool.

use std::time::Instant;

use clap::{Parser, Subcommand};
use club_network_ingest::seed::SeedFile;
use club_network_ingest::{apply_seed, list_clubs, open_store};

#[derive(Parser)]
#[command(
    name = "club_network_ingest",
    about = "Club network content seeding tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Apply a TOML seed document
    Seed {
        /// Path to the seed document
        file: String,
    },
    /// Apply the bundled sample seed
    Sample,
    /// List published clubs
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return club_network_ingest::interactive::run().await;
    };

    match command {
        Commands::Migrate => {
            log::info!("Running database migrations...");
            let db = club_network_store::db::connect_from_env().await?;
            club_network_store::run_migrations(db.as_ref()).await?;
            log::info!("Migrations complete.");
        }
        Commands::Seed { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let seed = SeedFile::from_toml_str(&raw)?;
            let store = open_store().await?;

            let start = Instant::now();
            let summary = apply_seed(&store, &seed).await?;
            log::info!(
                "Seed complete: {} clubs, {} terms in {:.1}s",
                summary.clubs,
                summary.terms,
                start.elapsed().as_secs_f64()
            );
        }
        Commands::Sample => {
            let seed = SeedFile::sample();
            let store = open_store().await?;

            let start = Instant::now();
            let summary = apply_seed(&store, &seed).await?;
            log::info!(
                "Sample seed complete: {} clubs, {} terms in {:.1}s",
                summary.clubs,
                summary.terms,
                start.elapsed().as_secs_f64()
            );
        }
        Commands::List => {
            let store = open_store().await?;
            list_clubs(&store).await?;
        }
    }

    Ok(())
}
