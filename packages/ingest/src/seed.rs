//! Seed document schema.
//!
//! A seed document is a TOML file declaring facility terms and club
//! records. [`apply_seed`](crate::apply_seed) upserts its contents, so
//! re-applying the same document replaces matching slugs instead of
//! duplicating them.

use club_network_club_models::{OpeningHours, PostStatus};
use serde::Deserialize;

/// Sample content embedded at compile time, applied by the `sample`
/// command.
pub const SAMPLE_SEED_TOML: &str = include_str!("../seeds/sample.toml");

/// A parsed seed document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    /// Facility terms with their display meta.
    #[serde(default)]
    pub facilities: Vec<SeedFacility>,
    /// Club records.
    #[serde(default)]
    pub clubs: Vec<SeedClub>,
}

impl SeedFile {
    /// Parses a TOML seed document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or does not
    /// match the seed schema.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Returns the bundled sample seed.
    ///
    /// # Panics
    ///
    /// Panics if the bundled document is malformed. The document is
    /// embedded at compile time and covered by tests.
    #[must_use]
    pub fn sample() -> Self {
        Self::from_toml_str(SAMPLE_SEED_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse sample seed: {e}"))
    }
}

/// A facility term declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedFacility {
    /// Display name.
    pub name: String,
    /// Slug override; derived from the name when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    /// Icon asset URL.
    #[serde(default)]
    pub icon_url: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
}

/// A club record declaration.
///
/// Only `title` is required. Everything else defaults to empty, matching
/// how absent attributes read back from the store.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedClub {
    pub title: String,
    /// Slug override; derived from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    /// Body text shown on the detail view.
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_status")]
    pub status: PostStatus,
    /// City term name. A club holds at most one city.
    #[serde(default)]
    pub city: String,
    /// Facility term names.
    #[serde(default)]
    pub facilities: Vec<String>,
    /// Membership category term names.
    #[serde(default)]
    pub membership_categories: Vec<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub hours: OpeningHours,
    /// Average rating, clamped to `[0.0, 5.0]` on write.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
    #[serde(default)]
    pub is_premium: bool,
    /// Latitude as a decimal string; leave empty for unmapped clubs.
    #[serde(default)]
    pub latitude: String,
    /// Longitude as a decimal string; leave empty for unmapped clubs.
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_website: String,
    #[serde(default)]
    pub book_tour_url: String,
    #[serde(default)]
    pub class_schedule_pdf: String,
    /// Pipe-delimited classes blob, one class per line.
    #[serde(default)]
    pub classes: String,
    /// Pipe-delimited membership plans blob, one plan per line.
    #[serde(default)]
    pub memberships: String,
    /// Grid card image URL.
    #[serde(default)]
    pub card_image: String,
    /// Detail hero image URL.
    #[serde(default)]
    pub hero_image: String,
}

const fn default_status() -> PostStatus {
    PostStatus::Publish
}
