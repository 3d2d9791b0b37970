#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Operator-configurable settings for the club network.
//!
//! Settings cover what a site operator tunes once per deployment: theme
//! colors, call-to-action labels, the Google Maps API key, and the URLs the
//! network is served from. They load from a TOML file named by the
//! `CLUB_NETWORK_SETTINGS` environment variable; every field is optional in
//! the file and falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the settings TOML file.
pub const SETTINGS_ENV: &str = "CLUB_NETWORK_SETTINGS";

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Site-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Google Maps JavaScript API key. Empty disables the map.
    pub google_maps_api_key: String,
    /// Primary theme color.
    pub primary_color: String,
    /// Secondary theme color.
    pub secondary_color: String,
    /// Body text color.
    pub text_color: String,
    /// Button label color.
    pub button_text_color: String,
    /// Label for the tour booking call to action.
    pub book_tour_text: String,
    /// Label for the directions call to action.
    pub get_directions_text: String,
    /// Label for the plan selection call to action.
    pub choose_plan_text: String,
    /// Public base URL of the site, used to build permalinks.
    pub site_url: String,
    /// Base URL under which bundled images and icons are served.
    pub asset_base_url: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            google_maps_api_key: String::new(),
            primary_color: "#3182ce".to_string(),
            secondary_color: "#f0f4f8".to_string(),
            text_color: "#4a5568".to_string(),
            button_text_color: "#ffffff".to_string(),
            book_tour_text: "Book a Tour".to_string(),
            get_directions_text: "Get Directions".to_string(),
            choose_plan_text: "Choose Plan".to_string(),
            site_url: "http://localhost:8080".to_string(),
            asset_base_url: "/assets".to_string(),
        }
    }
}

impl NetworkSettings {
    /// Parses settings from TOML text. Absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// * If the text is not valid TOML or a field has the wrong type
    pub fn from_toml_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read
    /// * If the file is not valid TOML
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path)?;

        Self::from_toml_str(&raw)
    }

    /// Loads settings from the file named by `CLUB_NETWORK_SETTINGS`, or
    /// returns defaults when the variable is unset.
    ///
    /// # Errors
    ///
    /// * If the named file cannot be read or parsed
    pub fn load_from_env() -> Result<Self, SettingsError> {
        std::env::var(SETTINGS_ENV).map_or_else(|_| Ok(Self::default()), Self::load_from)
    }

    /// Asset base URL without a trailing slash.
    #[must_use]
    pub fn asset_base(&self) -> &str {
        self.asset_base_url.trim_end_matches('/')
    }

    /// URL of the bundled asset at `file`, e.g. `images/marker-standard.svg`.
    #[must_use]
    pub fn asset_url(&self, file: &str) -> String {
        format!("{}/{file}", self.asset_base())
    }

    /// URL of the fallback club card image.
    #[must_use]
    pub fn default_image_url(&self) -> String {
        self.asset_url("images/default-club-image.jpg")
    }
}
