//! Map configuration assembly.
//!
//! The map payload carries markers for every mappable matching club plus the
//! viewport, icon URLs, and client strings needed to draw the map without a
//! second round trip. A club is mappable when both of its stored
//! coordinates parse as finite numbers.

use club_network_club_models::Club;
use club_network_directory_models::{MapCenter, MapConfig, MapIconUrls, MapMarker, MapText};
use club_network_settings::NetworkSettings;
use club_network_store::ContentStore;
use club_network_store_models::ClubFilter;

use crate::clubs::clubs_data;
use crate::parsing::parse_coordinates;
use crate::DirectoryError;

/// Center used when no club has usable coordinates.
pub const DEFAULT_CENTER: MapCenter = MapCenter {
    lat: 31.7917,
    lng: -7.0926,
};

/// Zoom used when no club has usable coordinates.
pub const DEFAULT_ZOOM: u8 = 6;

/// Zoom applied when a single club is shown or focused.
pub const ZOOM_SINGLE: u8 = 14;

/// Computes the map payload for the clubs matching `filter`.
///
/// # Errors
///
/// * If the content store fails
pub async fn map_config_data(
    store: &dyn ContentStore,
    filter: &ClubFilter,
    settings: &NetworkSettings,
) -> Result<MapConfig, DirectoryError> {
    let clubs = clubs_data(store, filter, settings).await?;

    Ok(build_map_config(&clubs, settings))
}

/// Builds the map payload from already-aggregated clubs.
#[must_use]
pub fn build_map_config(clubs: &[Club], settings: &NetworkSettings) -> MapConfig {
    let markers: Vec<MapMarker> = clubs
        .iter()
        .filter_map(|club| {
            parse_coordinates(&club.latitude, &club.longitude).map(|(lat, lng)| MapMarker {
                id: club.id,
                title: club.title.clone(),
                lat,
                lng,
                is_premium: club.is_premium,
                permalink: club.permalink.clone(),
                address: club.address.clone(),
                city_name: club.city_name.clone(),
            })
        })
        .collect();

    let (center, zoom) = viewport_for(&markers);

    MapConfig {
        center,
        zoom,
        zoom_single: ZOOM_SINGLE,
        marker_icon_standard: settings.asset_url("images/marker-standard.svg"),
        marker_icon_premium: settings.asset_url("images/marker-premium.svg"),
        locations_count: markers.len() as u64,
        icon_urls: icon_urls(settings),
        text: MapText::default(),
        clubs: markers,
    }
}

fn viewport_for(markers: &[MapMarker]) -> (MapCenter, u8) {
    if markers.is_empty() {
        return (DEFAULT_CENTER, DEFAULT_ZOOM);
    }

    #[allow(clippy::cast_precision_loss)]
    let count = markers.len() as f64;
    let lat = markers.iter().map(|m| m.lat).sum::<f64>() / count;
    let lng = markers.iter().map(|m| m.lng).sum::<f64>() / count;

    let zoom = if markers.len() == 1 {
        ZOOM_SINGLE
    } else if markers.len() < 5 {
        10
    } else {
        7
    };

    (MapCenter { lat, lng }, zoom)
}

fn icon_urls(settings: &NetworkSettings) -> MapIconUrls {
    MapIconUrls {
        phone: settings.asset_url("images/phone-icon.svg"),
        clock: settings.asset_url("images/clock-icon.svg"),
        amenities: settings.asset_url("images/amenities-icon.svg"),
        directions: settings.asset_url("images/directions-icon.svg"),
        location_pin: settings.asset_url("images/location-icon.svg"),
        club_list_pin: settings.asset_url("images/location-pin-alt.svg"),
    }
}

#[cfg(test)]
mod tests {
    use club_network_club_models::OpeningHours;

    use super::*;

    fn club(id: i64, lat: &str, lng: &str) -> Club {
        Club {
            id,
            title: format!("Club {id}"),
            permalink: format!("http://localhost:8080/clubs/club-{id}"),
            city_name: "Casablanca".to_string(),
            facilities: Vec::new(),
            membership_category: Vec::new(),
            address: format!("{id} Main St"),
            hours: OpeningHours::default(),
            rating: 0.0,
            reviews_count: 0,
            is_premium: id % 2 == 0,
            latitude: lat.to_string(),
            longitude: lng.to_string(),
            thumbnail: String::new(),
            contact_phone: String::new(),
            class_schedule_pdf: String::new(),
        }
    }

    #[test]
    fn empty_list_falls_back_to_default_viewport() {
        let config = build_map_config(&[], &NetworkSettings::default());

        assert!(config.clubs.is_empty());
        assert_eq!(config.locations_count, 0);
        assert!((config.center.lat - 31.7917).abs() < f64::EPSILON);
        assert!((config.center.lng - -7.0926).abs() < f64::EPSILON);
        assert_eq!(config.zoom, 6);
        assert_eq!(config.zoom_single, 14);
    }

    #[test]
    fn single_club_centers_and_zooms_in() {
        let config = build_map_config(
            &[club(1, "33.5731", "-7.5898")],
            &NetworkSettings::default(),
        );

        assert_eq!(config.locations_count, 1);
        assert_eq!(config.zoom, 14);
        assert!((config.center.lat - 33.5731).abs() < f64::EPSILON);
        assert!((config.center.lng - -7.5898).abs() < f64::EPSILON);
    }

    #[test]
    fn zoom_steps_down_as_the_set_grows() {
        let small: Vec<Club> = (1..=4).map(|i| club(i, "33.0", "-7.0")).collect();
        assert_eq!(build_map_config(&small, &NetworkSettings::default()).zoom, 10);

        let large: Vec<Club> = (1..=5).map(|i| club(i, "33.0", "-7.0")).collect();
        assert_eq!(build_map_config(&large, &NetworkSettings::default()).zoom, 7);
    }

    #[test]
    fn same_clubs_build_the_same_config() {
        let clubs = vec![club(1, "33.5731", "-7.5898"), club(2, "34.0209", "-6.8416")];
        let settings = NetworkSettings::default();

        assert_eq!(
            build_map_config(&clubs, &settings),
            build_map_config(&clubs, &settings)
        );
    }

    #[test]
    fn center_is_the_mean_of_marker_coordinates() {
        let clubs = vec![club(1, "30.0", "-6.0"), club(2, "34.0", "-8.0")];

        let config = build_map_config(&clubs, &NetworkSettings::default());

        assert!((config.center.lat - 32.0).abs() < f64::EPSILON);
        assert!((config.center.lng - -7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn three_spread_clubs_center_on_their_mean() {
        let clubs = vec![
            club(1, "30.0", "-8.0"),
            club(2, "31.0", "-7.0"),
            club(3, "32.0", "-6.0"),
        ];

        let config = build_map_config(&clubs, &NetworkSettings::default());

        assert_eq!(config.zoom, 10);
        assert!((config.center.lat - 31.0).abs() < f64::EPSILON);
        assert!((config.center.lng - -7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unmappable_clubs_are_left_out() {
        let clubs = vec![
            club(1, "33.5731", "-7.5898"),
            club(2, "", "-7.5898"),
            club(3, "north", "-7.5898"),
            club(4, "NaN", "-7.5898"),
        ];

        let config = build_map_config(&clubs, &NetworkSettings::default());

        assert_eq!(config.locations_count, 1);
        assert_eq!(config.clubs.len(), 1);
        assert_eq!(config.clubs[0].id, 1);
        assert_eq!(config.zoom, 14);
    }

    #[test]
    fn marker_carries_club_presentation_fields() {
        let config = build_map_config(
            &[club(2, "33.5731", "-7.5898")],
            &NetworkSettings::default(),
        );

        let marker = &config.clubs[0];
        assert_eq!(marker.title, "Club 2");
        assert!(marker.is_premium);
        assert_eq!(marker.permalink, "http://localhost:8080/clubs/club-2");
        assert_eq!(marker.address, "2 Main St");
        assert_eq!(marker.city_name, "Casablanca");
    }

    #[test]
    fn icon_and_marker_urls_derive_from_asset_base() {
        let settings = NetworkSettings {
            asset_base_url: "https://cdn.example/assets".to_string(),
            ..NetworkSettings::default()
        };

        let config = build_map_config(&[], &settings);

        assert_eq!(
            config.marker_icon_standard,
            "https://cdn.example/assets/images/marker-standard.svg"
        );
        assert_eq!(
            config.marker_icon_premium,
            "https://cdn.example/assets/images/marker-premium.svg"
        );
        assert_eq!(
            config.icon_urls.phone,
            "https://cdn.example/assets/images/phone-icon.svg"
        );
        assert_eq!(
            config.icon_urls.club_list_pin,
            "https://cdn.example/assets/images/location-pin-alt.svg"
        );
    }
}
