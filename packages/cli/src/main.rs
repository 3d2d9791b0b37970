#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive CLI orchestrator for the club network toolchain.
//!
//! Provides a unified entry point that lets users interactively select
//! which tool to run (seed content, start the server, run migrations)
//! without memorizing each binary's flags.

use dialoguer::Select;

/// Top-level tool selection for the club network toolchain.
enum Tool {
    Ingest,
    Server,
    Migrate,
}

impl Tool {
    const ALL: &[Self] = &[Self::Ingest, Self::Server, Self::Migrate];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Ingest => "Seed content",
            Self::Server => "Start server",
            Self::Migrate => "Run database migrations",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    println!("Club Network Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Ingest => club_network_ingest::interactive::run().await?,
        Tool::Server => {
            // The server uses actix-web's runtime, so it runs in a
            // blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(club_network_server::run_server())
            })
            .await??;
        }
        Tool::Migrate => {
            log::info!("Running database migrations...");
            let db = club_network_store::db::connect_from_env().await?;
            club_network_store::run_migrations(db.as_ref()).await?;
            log::info!("Migrations complete.");
        }
    }

    Ok(())
}
