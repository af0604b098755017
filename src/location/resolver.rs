//! Location resolver: orchestrates the fallback chain.
//!
//! Stored annotation → cache → Nominatim reverse → bounding-box classifier.
//! Every step after the first is skipped as soon as one yields a country.

use super::cache::LocationCache;
use super::providers;
use super::types::{canonical_country, LocationSource, ResolvedRegion, StoredAnnotation};
use crate::region::{classify_region_with, Coordinate, Country, LabelMode, DETECTED_REGION_LABEL};

/// The resolver with its fallback pipeline.
pub struct LocationResolver {
    cache: LocationCache,
    offline: bool,
    mode: LabelMode,
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationResolver {
    pub fn new() -> Self {
        Self::with_cache(LocationCache::load())
    }

    /// Create a resolver over a specific cache. Expired entries are dropped on the way in.
    pub fn with_cache(mut cache: LocationCache) -> Self {
        let pruned = cache.prune();
        if pruned > 0 {
            log::debug!("pruned {} expired cache entries", pruned);
        }
        Self {
            cache,
            offline: false,
            mode: LabelMode::default(),
        }
    }

    /// Set offline mode: skip network calls.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn set_mode(&mut self, mode: LabelMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    /// Resolve labels for a coordinate with no stored annotation.
    pub fn resolve_coords(&mut self, coord: Coordinate) -> ResolvedRegion {
        self.resolve(coord, &StoredAnnotation::default())
    }

    /// Resolve labels for a coordinate, preferring what the record already carries.
    pub fn resolve(&mut self, coord: Coordinate, stored: &StoredAnnotation) -> ResolvedRegion {
        // 1. Stored annotation
        if let Some(country) = stored.country() {
            let region = match stored.state() {
                Some(state) => state.to_string(),
                None => classify_region_with(coord.lat, coord.lng, country, self.mode).to_string(),
            };
            log::debug!("{}: using stored annotation", coord);
            return ResolvedRegion {
                lat: coord.lat,
                lng: coord.lng,
                country: canonical_country(country),
                region,
                source: LocationSource::Stored,
                display_name: None,
            };
        }

        // 2. Cache
        if let Some(hit) = self.cache.get(coord) {
            log::debug!("{}: cache hit", coord);
            return hit.into_resolved(LocationSource::Cache, self.mode);
        }

        // 3. Nominatim (if online)
        if !self.offline && coord.is_plausible() {
            match providers::nominatim_reverse(coord) {
                Ok(place) => {
                    self.cache.put(&place);
                    return place.into_resolved(LocationSource::Nominatim, self.mode);
                }
                Err(e) => log::warn!("{}: reverse geocoding failed, using built-in tables: {}", coord, e),
            }
        }

        // 4. Built-in tables (always available)
        Self::classify(coord, self.mode)
    }

    /// Classifier-only answer, no cache or network.
    pub fn classify(coord: Coordinate, mode: LabelMode) -> ResolvedRegion {
        let (country, region) = match Country::locate(coord) {
            Some(c) => (c.name().to_string(), c.region_at(coord, mode).to_string()),
            None => (String::new(), DETECTED_REGION_LABEL.to_string()),
        };
        ResolvedRegion {
            lat: coord.lat,
            lng: coord.lng,
            country,
            region,
            source: LocationSource::Classifier,
            display_name: None,
        }
    }
}
