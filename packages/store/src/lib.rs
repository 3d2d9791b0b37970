#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Content store for the club network.
//!
//! The [`ContentStore`] trait is the only surface the directory and ingest
//! layers talk to. Two backends implement it: [`sql::SqlContentStore`] for
//! SQLite/PostgreSQL and [`memory::MemoryContentStore`] for tests and
//! ephemeral runs.

pub mod db;
pub mod memory;
pub mod sql;

use std::collections::BTreeMap;

use async_trait::async_trait;
use club_network_club_models::{ImageSize, Taxonomy, Term};
use club_network_store_models::{NewClub, RawClubRecord, TermPredicate};
use include_dir::{Dir, include_dir};
use switchy_database::Database;
use switchy_schema::discovery::embedded::EmbeddedMigrationSource;
use switchy_schema::runner::MigrationRunner;
use thiserror::Error;

/// Embedded SQL migrations from the `migrations/` directory.
static MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../../migrations");

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] switchy_schema::MigrationError),

    /// Row conversion error
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of the conversion failure
        message: String,
    },
}

/// Runs all embedded migrations against the given database.
///
/// # Errors
///
/// * If a migration fails to apply
pub async fn run_migrations(db: &dyn Database) -> Result<(), StoreError> {
    let source = EmbeddedMigrationSource::new(&MIGRATIONS_DIR);
    let runner = MigrationRunner::new(Box::new(source));
    runner.run(db).await?;
    log::info!("Database migrations completed successfully");
    Ok(())
}

/// Read and write access to clubs, terms, meta, and images.
///
/// Read methods never fail on absent data. A missing meta key reads as an
/// empty string, a missing image as an empty URL, and an unknown or
/// unpublished club as `None`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Returns every published club matching `predicate`, ordered by title.
    async fn query_published_clubs(
        &self,
        predicate: &TermPredicate,
    ) -> Result<Vec<RawClubRecord>, StoreError>;

    /// Returns the club with `club_id` if it exists and is published.
    async fn get_published_club(
        &self,
        club_id: i64,
    ) -> Result<Option<RawClubRecord>, StoreError>;

    /// Returns the terms of `taxonomy` assigned to `club_id`, ordered by name.
    async fn get_terms_for(
        &self,
        club_id: i64,
        taxonomy: Taxonomy,
    ) -> Result<Vec<Term>, StoreError>;

    /// Returns the distinct terms of `taxonomy` assigned to at least one
    /// published club, ordered by name.
    async fn get_terms_in_use(&self, taxonomy: Taxonomy) -> Result<Vec<Term>, StoreError>;

    /// Returns every meta key/value pair stored for `club_id`.
    async fn get_club_meta_map(
        &self,
        club_id: i64,
    ) -> Result<BTreeMap<String, String>, StoreError>;

    /// Returns a single meta value for `club_id`, or an empty string.
    async fn get_club_meta(&self, club_id: i64, key: &str) -> Result<String, StoreError> {
        let mut meta = self.get_club_meta_map(club_id).await?;

        Ok(meta.remove(key).unwrap_or_default())
    }

    /// Returns a meta value for `term_id`, or an empty string.
    async fn get_term_meta(&self, term_id: i64, key: &str) -> Result<String, StoreError>;

    /// Returns the image URL registered for `club_id` at `size`, or an empty
    /// string.
    async fn get_thumbnail_url(
        &self,
        club_id: i64,
        size: ImageSize,
    ) -> Result<String, StoreError>;

    /// Inserts or updates a club keyed by slug and returns its id.
    async fn upsert_club(&self, club: &NewClub) -> Result<i64, StoreError>;

    /// Inserts or updates a term keyed by `(taxonomy, slug)` and returns its
    /// id.
    async fn upsert_term(
        &self,
        taxonomy: Taxonomy,
        name: &str,
        slug: &str,
    ) -> Result<i64, StoreError>;

    /// Replaces the terms of `taxonomy` assigned to `club_id` with `term_ids`.
    async fn set_club_terms(
        &self,
        club_id: i64,
        taxonomy: Taxonomy,
        term_ids: &[i64],
    ) -> Result<(), StoreError>;

    /// Writes a meta value for `club_id`, replacing any existing value.
    async fn put_club_meta(&self, club_id: i64, key: &str, value: &str)
        -> Result<(), StoreError>;

    /// Removes a meta key from `club_id` if present.
    async fn delete_club_meta(&self, club_id: i64, key: &str) -> Result<(), StoreError>;

    /// Writes a meta value for `term_id`, replacing any existing value.
    async fn put_term_meta(&self, term_id: i64, key: &str, value: &str)
        -> Result<(), StoreError>;

    /// Registers an image URL for `club_id` at `size`, replacing any existing
    /// one.
    async fn set_club_image(
        &self,
        club_id: i64,
        size: ImageSize,
        url: &str,
    ) -> Result<(), StoreError>;
}
