#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the club network server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the store row types to allow independent evolution of the API
//! contract.

use club_network_settings::NetworkSettings;
use club_network_store_models::ClubFilter;
use serde::{Deserialize, Serialize};

/// Query parameters for the club list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubQueryParams {
    /// City term slug.
    pub city: Option<String>,
    /// Facility term slug.
    pub facility: Option<String>,
    /// Membership category term slug.
    pub membership_category: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl ClubQueryParams {
    /// The filter dimensions of the query.
    #[must_use]
    pub fn filter(&self) -> ClubFilter {
        ClubFilter {
            city: self.city.clone(),
            facility: self.facility.clone(),
            membership_category: self.membership_category.clone(),
        }
    }
}

/// Query parameters for the map endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapQueryParams {
    /// City term slug.
    pub city: Option<String>,
    /// Facility term slug.
    pub facility: Option<String>,
    /// Membership category term slug.
    pub membership_category: Option<String>,
}

impl MapQueryParams {
    /// The filter dimensions of the query.
    #[must_use]
    pub fn filter(&self) -> ClubFilter {
        ClubFilter {
            city: self.city.clone(),
            facility: self.facility.clone(),
            membership_category: self.membership_category.clone(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Theme colors applied by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Primary color.
    pub primary: String,
    /// Secondary color.
    pub secondary: String,
    /// Body text color.
    pub text: String,
    /// Button label color.
    pub button_text: String,
}

/// Strings rendered by club cards and the detail modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientText {
    /// Tour booking call to action.
    pub book_tour: String,
    /// Directions call to action.
    pub get_directions: String,
    /// Plan selection call to action.
    pub choose_plan: String,
    /// Shown while the detail modal is loading.
    pub loading: String,
    /// Shown when a detail fetch fails.
    pub error: String,
    /// Shown when a club lists no facilities.
    pub no_facilities: String,
    /// Shown when a club has no class schedule.
    pub no_classes: String,
    /// Shown when a club has no membership plans.
    pub no_memberships: String,
    /// Schedule PDF view link label.
    pub view_pdf: String,
    /// Schedule PDF download link label.
    pub download_pdf: String,
}

/// Icon URLs used by club cards and the detail modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientIcons {
    /// Location pin icon.
    pub location: String,
    /// Opening hours icon.
    pub hours: String,
    /// Filled rating star.
    pub star_filled: String,
    /// Half rating star.
    pub star_half: String,
    /// Empty rating star.
    pub star_empty: String,
}

/// Bootstrap payload the browser client reads before first render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Whether a Google Maps API key is configured. The key itself is never
    /// sent to clients on this payload.
    pub google_maps_api_key_present: bool,
    /// Theme colors.
    pub colors: ThemeColors,
    /// Fallback club image URL.
    pub default_image: String,
    /// Client strings.
    pub text: ClientText,
    /// Icon URLs.
    pub icons: ClientIcons,
}

impl ClientConfig {
    /// Builds the payload from site settings.
    #[must_use]
    pub fn from_settings(settings: &NetworkSettings) -> Self {
        Self {
            google_maps_api_key_present: !settings.google_maps_api_key.is_empty(),
            colors: ThemeColors {
                primary: settings.primary_color.clone(),
                secondary: settings.secondary_color.clone(),
                text: settings.text_color.clone(),
                button_text: settings.button_text_color.clone(),
            },
            default_image: settings.default_image_url(),
            text: ClientText {
                book_tour: settings.book_tour_text.clone(),
                get_directions: settings.get_directions_text.clone(),
                choose_plan: settings.choose_plan_text.clone(),
                loading: "Loading...".to_string(),
                error: "Could not load club details. Please try again.".to_string(),
                no_facilities: "No specific facilities listed.".to_string(),
                no_classes: "Class schedule not available.".to_string(),
                no_memberships: "Membership information not available.".to_string(),
                view_pdf: "View Schedule PDF".to_string(),
                download_pdf: "Download Schedule PDF".to_string(),
            },
            icons: ClientIcons {
                location: settings.asset_url("images/location-icon.svg"),
                hours: settings.asset_url("images/clock-icon.svg"),
                star_filled: settings.asset_url("images/star-filled.svg"),
                star_half: settings.asset_url("images/star-half.svg"),
                star_empty: settings.asset_url("images/star-empty.svg"),
            },
        }
    }
}
