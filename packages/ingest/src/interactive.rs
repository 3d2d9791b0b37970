//! Interactive TUI for the content seeding tool.
//!
//! Provides a menu-driven interface using `dialoguer` for running ingest
//! commands without memorizing CLI flags.

use std::time::Instant;

use club_network_store::ContentStore;
use dialoguer::{Confirm, Input, Select};

use crate::seed::SeedFile;

/// Top-level actions available in the ingest interactive menu.
enum IngestAction {
    SeedSample,
    SeedFile,
    ListClubs,
    RunMigrations,
}

impl IngestAction {
    const ALL: &[Self] = &[
        Self::SeedSample,
        Self::SeedFile,
        Self::ListClubs,
        Self::RunMigrations,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::SeedSample => "Apply the bundled sample seed",
            Self::SeedFile => "Apply a seed file",
            Self::ListClubs => "List published clubs",
            Self::RunMigrations => "Run database migrations",
        }
    }
}

/// Runs the interactive menu loop, prompting the user to select and
/// configure a seeding operation.
///
/// # Errors
///
/// Returns an error if database connection, migrations, or the selected
/// operation fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = crate::open_store().await?;

    let labels: Vec<&str> = IngestAction::ALL.iter().map(IngestAction::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match IngestAction::ALL[idx] {
        IngestAction::SeedSample => seed_sample(&store).await?,
        IngestAction::SeedFile => seed_from_file(&store).await?,
        IngestAction::ListClubs => crate::list_clubs(&store).await?,
        IngestAction::RunMigrations => {
            log::info!("Running database migrations...");
            let db = club_network_store::db::connect_from_env().await?;
            club_network_store::run_migrations(db.as_ref()).await?;
            log::info!("Migrations complete.");
        }
    }

    Ok(())
}

/// Confirms and applies the bundled sample seed.
async fn seed_sample(store: &dyn ContentStore) -> Result<(), Box<dyn std::error::Error>> {
    let seed = SeedFile::sample();

    let proceed = Confirm::new()
        .with_prompt(format!(
            "Apply the sample seed ({} clubs, {} facilities)?",
            seed.clubs.len(),
            seed.facilities.len()
        ))
        .default(true)
        .interact()?;

    if !proceed {
        println!("Nothing applied.");
        return Ok(());
    }

    let start = Instant::now();
    let summary = crate::apply_seed(store, &seed).await?;
    log::info!(
        "Seed complete: {} clubs, {} terms in {:.1}s",
        summary.clubs,
        summary.terms,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Prompts for a seed file path and applies it.
async fn seed_from_file(store: &dyn ContentStore) -> Result<(), Box<dyn std::error::Error>> {
    let path: String = Input::new()
        .with_prompt("Path to the seed file")
        .interact_text()?;

    let raw = std::fs::read_to_string(path.trim())?;
    let seed = SeedFile::from_toml_str(&raw)?;

    let start = Instant::now();
    let summary = crate::apply_seed(store, &seed).await?;
    log::info!(
        "Seed complete: {} clubs, {} terms in {:.1}s",
        summary.clubs,
        summary.terms,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
