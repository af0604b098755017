//! Core types for the region classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label returned when no region can be named for the given country.
pub const DETECTED_REGION_LABEL: &str = "Región detectada";

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the usual degree ranges.
    /// The classifier itself never calls this; it is for input validation at the edges.
    pub fn is_plausible(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Axis-aligned lat/lng rectangle with a display name. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub name: &'static str,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl BoundingBox {
    pub const fn new(name: &'static str, lat: (f64, f64), lng: (f64, f64)) -> Self {
        Self {
            name,
            lat_min: lat.0,
            lat_max: lat.1,
            lng_min: lng.0,
            lng_max: lng.1,
        }
    }

    /// Inclusive containment. NaN fails every comparison and so never matches.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.lat_min <= coord.lat
            && coord.lat <= self.lat_max
            && self.lng_min <= coord.lng
            && coord.lng <= self.lng_max
    }
}

/// Countries the product knows how to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    Guatemala,
    ElSalvador,
    Honduras,
    Nicaragua,
    CostaRica,
    Panama,
    Colombia,
    Mexico,
    UnitedStates,
    Canada,
}

impl Country {
    pub const ALL: [Country; 10] = [
        Country::Guatemala,
        Country::ElSalvador,
        Country::Honduras,
        Country::Nicaragua,
        Country::CostaRica,
        Country::Panama,
        Country::Colombia,
        Country::Mexico,
        Country::UnitedStates,
        Country::Canada,
    ];

    /// Canonical display name. This is the only spelling the classifier emits.
    pub fn name(self) -> &'static str {
        match self {
            Self::Guatemala => "Guatemala",
            Self::ElSalvador => "El Salvador",
            Self::Honduras => "Honduras",
            Self::Nicaragua => "Nicaragua",
            Self::CostaRica => "Costa Rica",
            Self::Panama => "Panamá",
            Self::Colombia => "Colombia",
            Self::Mexico => "México",
            Self::UnitedStates => "Estados Unidos",
            Self::Canada => "Canadá",
        }
    }

    /// ISO 3166-1 alpha-2 code.
    pub fn iso_code(self) -> &'static str {
        match self {
            Self::Guatemala => "GT",
            Self::ElSalvador => "SV",
            Self::Honduras => "HN",
            Self::Nicaragua => "NI",
            Self::CostaRica => "CR",
            Self::Panama => "PA",
            Self::Colombia => "CO",
            Self::Mexico => "MX",
            Self::UnitedStates => "US",
            Self::Canada => "CA",
        }
    }

    /// Lenient lookup: canonical names with or without accents, English
    /// spellings and ISO alpha-2 codes, all case-insensitive.
    pub fn parse(input: &str) -> Option<Country> {
        let key = fold(input);
        if key.is_empty() {
            return None;
        }
        let country = match key.as_str() {
            "guatemala" | "gt" => Self::Guatemala,
            "el salvador" | "salvador" | "sv" => Self::ElSalvador,
            "honduras" | "hn" => Self::Honduras,
            "nicaragua" | "ni" => Self::Nicaragua,
            "costa rica" | "cr" => Self::CostaRica,
            "panama" | "pa" => Self::Panama,
            "colombia" | "co" => Self::Colombia,
            "mexico" | "mx" | "estados unidos mexicanos" => Self::Mexico,
            "estados unidos" | "united states" | "united states of america" | "usa" | "us"
            | "eeuu" | "ee. uu." | "ee.uu." => Self::UnitedStates,
            "canada" | "ca" => Self::Canada,
            _ => return None,
        };
        Some(country)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which default-label convention to use when no region box matches.
///
/// `Listing` is the canonical convention used by visit listings and filters.
/// `HeatMap` keeps the labels the heat-map buckets were built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    #[default]
    Listing,
    HeatMap,
}

impl LabelMode {
    pub fn parse(s: &str) -> Option<LabelMode> {
        match s.trim().to_lowercase().as_str() {
            "listing" | "list" => Some(Self::Listing),
            "heatmap" | "heat-map" | "heat_map" => Some(Self::HeatMap),
            _ => None,
        }
    }
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listing => write!(f, "listing"),
            Self::HeatMap => write!(f, "heatmap"),
        }
    }
}

/// Output of a full classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Canonical country name, or empty when no box matched.
    pub country: String,
    /// Present whenever `country` is non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Lowercase, strip Spanish diacritics and collapse whitespace.
pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
        .replace('á', "a")
        .replace('é', "e")
        .replace('í', "i")
        .replace('ó', "o")
        .replace('ú', "u")
        .replace('ü', "u")
        .replace('ñ', "n")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive_edges() {
        let b = BoundingBox::new("box", (13.0, 17.8), (-92.5, -88.0));
        assert!(b.contains(Coordinate::new(13.0, -90.0)));
        assert!(b.contains(Coordinate::new(17.8, -88.0)));
        assert!(b.contains(Coordinate::new(13.0, -92.5)));
        assert!(!b.contains(Coordinate::new(12.9999, -90.0)));
    }

    #[test]
    fn test_contains_rejects_nan() {
        let b = BoundingBox::new("box", (-90.0, 90.0), (-180.0, 180.0));
        assert!(!b.contains(Coordinate::new(f64::NAN, 0.0)));
        assert!(!b.contains(Coordinate::new(0.0, f64::NAN)));
    }

    #[test]
    fn test_country_parse_lenient() {
        assert_eq!(Country::parse("México"), Some(Country::Mexico));
        assert_eq!(Country::parse("mexico"), Some(Country::Mexico));
        assert_eq!(Country::parse("  MX "), Some(Country::Mexico));
        assert_eq!(Country::parse("PANAMÁ"), Some(Country::Panama));
        assert_eq!(Country::parse("United States"), Some(Country::UnitedStates));
        assert_eq!(Country::parse("El  Salvador"), Some(Country::ElSalvador));
        assert_eq!(Country::parse(""), None);
        assert_eq!(Country::parse("Perú"), None);
    }

    #[test]
    fn test_country_names_roundtrip_through_parse() {
        for c in Country::ALL {
            assert_eq!(Country::parse(c.name()), Some(c));
            assert_eq!(Country::parse(c.iso_code()), Some(c));
        }
    }

    #[test]
    fn test_label_mode_parse() {
        assert_eq!(LabelMode::parse("HeatMap"), Some(LabelMode::HeatMap));
        assert_eq!(LabelMode::parse("listing"), Some(LabelMode::Listing));
        assert_eq!(LabelMode::parse("chart"), None);
        assert_eq!(LabelMode::default(), LabelMode::Listing);
    }

    #[test]
    fn test_coordinate_plausible() {
        assert!(Coordinate::new(14.6, -90.5).is_plausible());
        assert!(!Coordinate::new(91.0, 0.0).is_plausible());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_plausible());
    }
}
