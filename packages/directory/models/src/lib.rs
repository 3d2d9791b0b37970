#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Serializable payloads produced by the directory layer.
//!
//! These are the exact JSON shapes clients consume: map configuration,
//! filter option lists, and paginated club pages.

use club_network_club_models::{Club, Term};
use serde::{Deserialize, Serialize};

/// A single marker on the club map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    /// Club id.
    pub id: i64,
    /// Club title.
    pub title: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Whether the club is drawn with the premium icon.
    #[serde(rename = "isPremium")]
    pub is_premium: bool,
    /// Detail page URL.
    pub permalink: String,
    /// Street address.
    pub address: String,
    /// City term name, empty when the club has no city.
    pub city_name: String,
}

/// Geographic center of the map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// URLs of the icons drawn inside map popups and the club list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapIconUrls {
    /// Phone icon.
    pub phone: String,
    /// Opening hours icon.
    pub clock: String,
    /// Amenities icon.
    pub amenities: String,
    /// Directions icon.
    pub directions: String,
    /// Location pin icon.
    pub location_pin: String,
    /// Pin icon used in the club list.
    pub club_list_pin: String,
}

/// User-facing strings rendered by the map client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapText {
    /// Shown while a detail panel is loading.
    pub loading_details: String,
    /// Shown when a detail fetch fails.
    pub details_error: String,
    /// Amenities section heading.
    pub amenities: String,
    /// Directions link label.
    pub directions: String,
    /// Shown when no club matches the active filters.
    pub no_clubs_found: String,
    /// Shown before any club is selected.
    pub select_club: String,
}

impl Default for MapText {
    fn default() -> Self {
        Self {
            loading_details: "Loading details...".to_string(),
            details_error: "Could not load details.".to_string(),
            amenities: "Amenities".to_string(),
            directions: "Itinéraire".to_string(),
            no_clubs_found: "No locations found matching your criteria.".to_string(),
            select_club: "Select a club from the list or map to see details.".to_string(),
        }
    }
}

/// Everything the map client needs to draw itself for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Markers for every mappable matching club.
    pub clubs: Vec<MapMarker>,
    /// Initial viewport center.
    pub center: MapCenter,
    /// Initial zoom level.
    pub zoom: u8,
    /// Zoom applied when the client focuses a single club.
    pub zoom_single: u8,
    /// Icon for standard club markers.
    pub marker_icon_standard: String,
    /// Icon for premium club markers.
    pub marker_icon_premium: String,
    /// Number of markers.
    pub locations_count: u64,
    /// Popup and list icon URLs.
    pub icon_urls: MapIconUrls,
    /// Client strings.
    pub text: MapText,
}

/// One selectable filter choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Term slug, the value a client submits back.
    pub slug: String,
    /// Display name.
    pub name: String,
}

impl From<Term> for FilterOption {
    fn from(term: Term) -> Self {
        Self {
            slug: term.slug,
            name: term.name,
        }
    }
}

/// The filter choices currently in use across published clubs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableFilters {
    /// City choices.
    pub cities: Vec<FilterOption>,
    /// Facility choices.
    pub facilities: Vec<FilterOption>,
    /// Membership category choices.
    pub membership_categories: Vec<FilterOption>,
}

/// One page of clubs plus the numbers a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedClubs {
    /// Clubs on this page, possibly empty.
    pub clubs: Vec<Club>,
    /// Total clubs across all pages.
    pub total_count: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// The page these clubs are from, 1-based.
    pub page: u32,
    /// Page size used for the slicing.
    pub per_page: u32,
}
