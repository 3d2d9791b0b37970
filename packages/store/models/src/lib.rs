#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Content store row types, filter criteria, and meta key definitions.
//!
//! These types describe the shapes of data as stored in and retrieved from
//! the content store. They are distinct from the view models in
//! `club_network_club_models`, which are assembled per request.

use club_network_club_models::{PostStatus, Taxonomy};
use serde::{Deserialize, Serialize};

/// Meta keys under which club and term attributes are stored.
pub mod meta_keys {
    /// Street address.
    pub const ADDRESS: &str = "_club_address";
    /// Monday through Friday opening hours.
    pub const HOURS_MF: &str = "_club_hours_mf";
    /// Saturday opening hours.
    pub const HOURS_SAT: &str = "_club_hours_sat";
    /// Sunday opening hours.
    pub const HOURS_SUN: &str = "_club_hours_sun";
    /// Average rating, stored as a decimal string in `[0, 5]`.
    pub const RATING: &str = "_club_rating";
    /// Review count, stored as a non-negative integer string.
    pub const REVIEWS_COUNT: &str = "_club_reviews_count";
    /// Premium flag, stored as `"1"` or `"0"`.
    pub const IS_PREMIUM: &str = "_club_is_premium";
    /// Latitude, stored as a decimal string (empty when unmapped).
    pub const LATITUDE: &str = "_club_latitude";
    /// Longitude, stored as a decimal string (empty when unmapped).
    pub const LONGITUDE: &str = "_club_longitude";
    /// Contact phone number.
    pub const CONTACT_PHONE: &str = "_club_contact_phone";
    /// Contact email address.
    pub const CONTACT_EMAIL: &str = "_club_contact_email";
    /// Contact website URL.
    pub const CONTACT_WEBSITE: &str = "_club_contact_website";
    /// Tour booking URL.
    pub const BOOK_TOUR_URL: &str = "_club_book_tour_url";
    /// Class schedule PDF URL.
    pub const CLASS_SCHEDULE_PDF: &str = "_club_class_schedule_pdf";
    /// Pipe-delimited classes blob.
    pub const CLASSES_DATA: &str = "_club_classes_data";
    /// Pipe-delimited membership plans blob.
    pub const MEMBERSHIPS_DATA: &str = "_club_memberships_data";

    /// Facility term icon URL.
    pub const FACILITY_ICON_URL: &str = "facility_icon_url";
    /// Facility term description.
    pub const FACILITY_DESCRIPTION: &str = "facility_description";
}

/// Raw filter criteria as received from a client.
///
/// Each field holds a term slug; `None` or an empty string leaves that
/// dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubFilter {
    /// City term slug.
    pub city: Option<String>,
    /// Facility term slug.
    pub facility: Option<String>,
    /// Membership category term slug.
    pub membership_category: Option<String>,
}

/// One resolved `(taxonomy, slug)` membership requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermConstraint {
    /// Taxonomy the slug belongs to.
    pub taxonomy: Taxonomy,
    /// Required term slug.
    pub slug: String,
}

/// A conjunction of term membership requirements.
///
/// An empty predicate matches every published club. A slug that matches no
/// term yields an empty result set rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPredicate {
    /// Constraints combined with AND.
    pub constraints: Vec<TermConstraint>,
}

impl TermPredicate {
    /// Resolves raw filter criteria into a predicate, dropping empty
    /// dimensions.
    #[must_use]
    pub fn from_filter(filter: &ClubFilter) -> Self {
        let mut constraints = Vec::new();
        for (taxonomy, slug) in [
            (Taxonomy::City, &filter.city),
            (Taxonomy::Facility, &filter.facility),
            (Taxonomy::MembershipCategory, &filter.membership_category),
        ] {
            if let Some(slug) = slug.as_deref()
                && !slug.is_empty()
            {
                constraints.push(TermConstraint {
                    taxonomy,
                    slug: slug.to_string(),
                });
            }
        }
        Self { constraints }
    }

    /// Returns `true` when no dimension is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// A club row as retrieved from the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClubRecord {
    /// Primary key.
    pub id: i64,
    /// Club title.
    pub title: String,
    /// URL-safe slug, unique across clubs.
    pub slug: String,
    /// Body text.
    pub content: String,
    /// Publication status.
    pub status: PostStatus,
    /// Public detail page URL, derived by the store from its site base URL.
    pub permalink: String,
}

/// Fields for creating or replacing a club row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClub {
    /// Club title.
    pub title: String,
    /// URL-safe slug; writes with an existing slug replace that club.
    pub slug: String,
    /// Body text.
    pub content: String,
    /// Publication status.
    pub status: PostStatus,
}
