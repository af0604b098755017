//! Bounding-box classification of coordinates into country and region labels.
//!
//! Every function here is total: no input makes it fail, and out-of-range or
//! NaN coordinates simply fall through to the default labels.

use super::tables::{region_table, COUNTRY_BOXES};
use super::types::{
    ClassificationResult, Coordinate, Country, LabelMode, DETECTED_REGION_LABEL,
};

/// Default region for México when no state box matches.
pub const MEXICO_OTHER_REGION: &str = "Otra región";

/// Guatemala default under `LabelMode::HeatMap`.
pub const GUATEMALA_CAPITAL_REGION: &str = "Guatemala (Capital)";

impl Country {
    /// First country box (in priority order) containing the coordinate.
    pub fn locate(coord: Coordinate) -> Option<Country> {
        COUNTRY_BOXES
            .iter()
            .find(|(_, b)| b.contains(coord))
            .map(|(c, _)| *c)
    }

    /// Region label for a coordinate already known to be in this country.
    pub fn region_at(self, coord: Coordinate, mode: LabelMode) -> &'static str {
        if let Some(table) = region_table(self) {
            if let Some(b) = table.iter().find(|b| b.contains(coord)) {
                return b.name;
            }
        }
        self.default_region(mode)
    }

    /// Label used when no region box matches.
    pub fn default_region(self, mode: LabelMode) -> &'static str {
        match (self, mode) {
            (Country::Mexico, _) => MEXICO_OTHER_REGION,
            (Country::Guatemala, LabelMode::Listing) => "Guatemala",
            (Country::Guatemala, LabelMode::HeatMap) => GUATEMALA_CAPITAL_REGION,
            (Country::ElSalvador, _) => "El Salvador",
            (Country::Honduras, _) => "Honduras",
            (other, LabelMode::Listing) => other.name(),
            (_, LabelMode::HeatMap) => DETECTED_REGION_LABEL,
        }
    }
}

/// Canonical country name for a coordinate, or `""` when no box matches.
pub fn classify_country(lat: f64, lng: f64) -> &'static str {
    Country::locate(Coordinate::new(lat, lng))
        .map(Country::name)
        .unwrap_or("")
}

/// Region label using the canonical `Listing` defaults.
pub fn classify_region(lat: f64, lng: f64, country: &str) -> &'static str {
    classify_region_with(lat, lng, country, LabelMode::Listing)
}

/// Region label for a coordinate within `country`.
///
/// `country` may be any spelling `Country::parse` accepts, so values coming
/// from server geocoding ("Mexico", "MX") dispatch the same as "México".
/// Unrecognised or empty input yields `"Región detectada"`.
pub fn classify_region_with(lat: f64, lng: f64, country: &str, mode: LabelMode) -> &'static str {
    match Country::parse(country) {
        Some(c) => c.region_at(Coordinate::new(lat, lng), mode),
        None => DETECTED_REGION_LABEL,
    }
}

/// Country and region in one pass.
pub fn classify(coord: Coordinate, mode: LabelMode) -> ClassificationResult {
    match Country::locate(coord) {
        Some(c) => ClassificationResult {
            country: c.name().to_string(),
            region: Some(c.region_at(coord, mode).to_string()),
        },
        None => ClassificationResult {
            country: String::new(),
            region: None,
        },
    }
}

/// Region labels a filter dropdown should offer for a country: declared
/// regions in table order, then the `Listing` default.
pub fn region_names(country: Country) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = region_table(country)
        .unwrap_or(&[])
        .iter()
        .map(|b| b.name)
        .collect();
    let fallback = country.default_region(LabelMode::Listing);
    if !names.contains(&fallback) {
        names.push(fallback);
    }
    names
}
