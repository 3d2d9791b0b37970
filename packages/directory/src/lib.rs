#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Club directory assembly.
//!
//! Turns content store rows into the payloads clients consume: filtered club
//! lists, filter option sets, map configuration, paginated pages, and
//! per-club detail. Nothing here writes to the store.

use thiserror::Error;

pub mod clubs;
pub mod map;
pub mod paginate;
pub mod parsing;

/// Errors that can occur while assembling directory payloads
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Content store error
    #[error("Store error: {0}")]
    Store(#[from] club_network_store::StoreError),
}
