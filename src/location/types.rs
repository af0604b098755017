//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::region::{classify_region_with, Coordinate, Country, LabelMode};

/// Label shown in place of an empty country.
pub const UNKNOWN_COUNTRY_LABEL: &str = "Desconocido";

/// Where a label pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    Stored,
    Cache,
    Nominatim,
    Classifier,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored => write!(f, "Stored"),
            Self::Cache => write!(f, "Cache"),
            Self::Nominatim => write!(f, "Nominatim"),
            Self::Classifier => write!(f, "Built-in"),
        }
    }
}

/// The `country`/`state` columns a visit record may already carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnnotation {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl StoredAnnotation {
    pub fn new(country: Option<&str>, state: Option<&str>) -> Self {
        Self {
            country: country.map(str::to_string),
            state: state.map(str::to_string),
        }
    }

    /// Stored country, ignoring blank strings.
    pub fn country(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }

    /// Stored state, ignoring blank strings.
    pub fn state(&self) -> Option<&str> {
        non_blank(self.state.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// A country/region label pair with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRegion {
    pub lat: f64,
    pub lng: f64,
    /// Canonical name when recognised, otherwise as supplied. Empty when unknown.
    pub country: String,
    pub region: String,
    pub source: LocationSource,
    /// Full display name from the geocoder, when one answered.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ResolvedRegion {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Country for display; never empty.
    pub fn country_label(&self) -> &str {
        if self.country.is_empty() {
            UNKNOWN_COUNTRY_LABEL
        } else {
            &self.country
        }
    }

    pub fn display_line(&self) -> String {
        format!(
            "\u{1F4CD} {} \u{2014} {} ({}) [{}]",
            self.region,
            self.country_label(),
            self.coordinate(),
            self.source
        )
    }
}

/// A geocoder answer as received. `region` is absent when the reply named no
/// subdivision; the table default is applied later, under the caller's mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub lat: f64,
    pub lng: f64,
    pub country: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl GeocodedPlace {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn into_resolved(self, source: LocationSource, mode: LabelMode) -> ResolvedRegion {
        let region = self.region.unwrap_or_else(|| {
            classify_region_with(self.lat, self.lng, &self.country, mode).to_string()
        });
        ResolvedRegion {
            lat: self.lat,
            lng: self.lng,
            country: self.country,
            region,
            source,
            display_name: self.display_name,
        }
    }
}

/// Map a supplied country name to its canonical spelling when recognised.
pub fn canonical_country(name: &str) -> String {
    match Country::parse(name) {
        Some(c) => c.name().to_string(),
        None => name.trim().to_string(),
    }
}

/// Reverse-geocoding errors. The resolver treats all of them as "fall through".
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
    #[error("No geocoding result for {0}")]
    NotFound(Coordinate),
}
