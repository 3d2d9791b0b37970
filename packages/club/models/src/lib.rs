#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Club domain types shared across the club network system.
//!
//! This crate defines the three classification taxonomies, the flat view
//! models served to the grid and map frontends, and the coercion rules for
//! meta values stored as strings (ratings, review counts, premium flags).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The three taxonomies a club can be classified under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Taxonomy {
    /// Geographic grouping. A club's first city term supplies its
    /// `city_name`.
    City,
    /// Amenities offered (pool, spa, group classes). Facility terms carry
    /// icon and description meta.
    Facility,
    /// Commercial tier grouping used by the plan filter.
    MembershipCategory,
}

impl Taxonomy {
    /// Returns all taxonomies.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::City, Self::Facility, Self::MembershipCategory]
    }
}

/// Named thumbnail sizes stored per club.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImageSize {
    /// Grid card thumbnail.
    MediumLarge,
    /// Detail modal hero image.
    Large,
}

/// Publication status of a club record. Only published clubs are visible
/// to any read path.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PostStatus {
    /// Publicly visible.
    Publish,
    /// Hidden from all read paths.
    Draft,
}

impl PostStatus {
    /// Returns `true` if records with this status are served to clients.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Publish)
    }
}

/// A taxonomy term as assigned to a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Store-assigned term ID.
    pub term_id: i64,
    /// Human-readable name.
    pub name: String,
    /// URL-safe slug, unique within its taxonomy.
    pub slug: String,
}

/// A facility term joined with its icon and description meta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityInfo {
    /// Facility name.
    pub name: String,
    /// Facility slug.
    pub slug: String,
    /// Icon asset URL, empty when the term has none.
    pub icon_url: String,
    /// Short description, empty when the term has none.
    pub description: String,
}

/// Weekly opening hours, as free text per day group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    /// Monday through Friday.
    pub mf: String,
    /// Saturday.
    pub sat: String,
    /// Sunday.
    pub sun: String,
}

/// A club as served to the grid view.
///
/// Assembled per request by joining the club record with its terms, term
/// meta, and club meta. Missing attributes come through as empty strings,
/// zero, or `false` rather than errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    /// Club record ID.
    pub id: i64,
    /// Club title.
    pub title: String,
    /// Public detail page URL.
    pub permalink: String,
    /// Name of the first assigned city term, empty when none.
    pub city_name: String,
    /// Facility terms with their meta.
    pub facilities: Vec<FacilityInfo>,
    /// Membership category terms, passed through unprocessed.
    pub membership_category: Vec<Term>,
    /// Street address.
    pub address: String,
    /// Opening hours.
    pub hours: OpeningHours,
    /// Average rating, clamped to `[0.0, 5.0]` at write time.
    pub rating: f64,
    /// Number of reviews.
    pub reviews_count: u32,
    /// Whether the club is a premium location.
    pub is_premium: bool,
    /// Latitude as stored (decimal string, empty when unmapped).
    pub latitude: String,
    /// Longitude as stored (decimal string, empty when unmapped).
    pub longitude: String,
    /// Grid thumbnail URL (falls back to the default club image).
    pub thumbnail: String,
    /// Contact phone number.
    pub contact_phone: String,
    /// Class schedule PDF URL.
    pub class_schedule_pdf: String,
}

/// Contact block on the detail payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubContact {
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Website URL.
    pub website: String,
}

/// Commerce and navigation URLs on the detail payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubUrls {
    /// Tour booking URL.
    pub book_tour: String,
    /// Public detail page URL.
    pub permalink: String,
    /// Class schedule PDF URL.
    pub class_schedule_pdf: String,
}

/// One fitness class parsed from the pipe-delimited classes blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubClass {
    /// Class name.
    pub name: String,
    /// Schedule text (e.g. `"Tue, Thu - 6:00 PM"`).
    pub schedule: String,
    /// Difficulty level text.
    pub level: String,
    /// Instructor name.
    pub instructor: String,
}

/// One membership plan parsed from the pipe-delimited memberships blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPlan {
    /// Plan name.
    pub name: String,
    /// Price text.
    pub price: String,
    /// Billing period text.
    pub period: String,
    /// Included features.
    pub features: Vec<String>,
    /// Whether the plan is highlighted as most popular.
    pub is_popular: bool,
    /// Signup URL, `"#"` when the plan has none.
    pub url: String,
}

/// A club as served to the detail modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedClub {
    /// Club record ID.
    pub id: i64,
    /// Club title.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Detail hero image URL (falls back to the default club image).
    pub thumbnail: String,
    /// Street address.
    pub address: String,
    /// Whether the club is a premium location.
    pub is_premium: bool,
    /// Latitude as stored.
    pub latitude: String,
    /// Longitude as stored.
    pub longitude: String,
    /// Average rating.
    pub rating: f64,
    /// Number of reviews.
    pub reviews_count: u32,
    /// Opening hours.
    pub hours: OpeningHours,
    /// Contact block.
    pub contact: ClubContact,
    /// Commerce and navigation URLs.
    pub urls: ClubUrls,
    /// Facility terms with their meta.
    pub facilities: Vec<FacilityInfo>,
    /// Parsed fitness classes.
    pub classes: Vec<ClubClass>,
    /// Parsed membership plans.
    pub memberships: Vec<MembershipPlan>,
}

/// Clamps a rating into the valid `[0.0, 5.0]` range.
///
/// Applied when a rating is written; read paths trust stored values.
#[must_use]
pub fn clamp_rating(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 5.0)
    } else {
        0.0
    }
}

/// Parses a stored rating string. Unparseable values read as `0.0`.
#[must_use]
pub fn parse_rating(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map_or(0.0, |v| {
        if v.is_finite() {
            v
        } else {
            0.0
        }
    })
}

/// Parses a stored review count as a non-negative integer.
///
/// Negative values count as their magnitude, fractional values truncate,
/// and garbage reads as zero.
#[must_use]
pub fn parse_review_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let value = trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| {
                #[allow(clippy::cast_possible_truncation)]
                let truncated = v.trunc() as i64;
                truncated
            })
    });
    value.map_or(0, |v| u32::try_from(v.unsigned_abs()).unwrap_or(u32::MAX))
}

/// Interprets a stored meta string as a boolean flag.
///
/// An empty string and `"0"` (after trimming) are `false`; every other
/// value is `true`.
#[must_use]
pub fn meta_flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed != "0"
}

/// The meta string representation of a boolean flag (`"1"` or `"0"`).
#[must_use]
pub const fn flag_meta_value(flag: bool) -> &'static str {
    if flag { "1" } else { "0" }
}
