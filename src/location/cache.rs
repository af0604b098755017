//! File-based annotation cache at ~/.fieldgeo/cache.json.
//!
//! Holds geocoder answers only, keyed by the coordinate rounded to four
//! decimals (about 11 m). TTL: 30 days. Classifier output is never stored
//! here: an answer without a region stays without one, and the resolver
//! fills the default under whatever label mode it runs with.

use super::types::GeocodedPlace;
use crate::region::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CACHE_TTL_MS: i64 = 30 * 24 * 3600 * 1000;

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    lat: f64,
    lng: f64,
    country: String,
    #[serde(default)]
    region: Option<String>,
    timestamp: i64,
    #[serde(default)]
    display_name: Option<String>,
}

impl CacheEntry {
    fn to_place(&self) -> GeocodedPlace {
        GeocodedPlace {
            lat: self.lat,
            lng: self.lng,
            country: self.country.clone(),
            region: self.region.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// The annotation cache.
pub struct LocationCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl LocationCache {
    /// Load cache from the default location (~/.fieldgeo/cache.json).
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load cache from a specific path. A missing or corrupt file yields an empty cache.
    pub fn load_from(path: PathBuf) -> Self {
        let entries = Self::read_file(&path).unwrap_or_default();
        Self { path, entries }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fieldgeo")
            .join("cache.json")
    }

    fn read_file(path: &Path) -> Option<HashMap<String, CacheEntry>> {
        let data = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&data) {
            Ok(entries) => Some(entries),
            Err(e) => {
                log::warn!("ignoring unreadable cache {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Cache key for a coordinate. `-0.0000` is folded into `0.0000`.
    pub fn key(coord: Coordinate) -> String {
        let round = |v: f64| {
            let r = (v * 10_000.0).round() / 10_000.0;
            if r == 0.0 { 0.0 } else { r }
        };
        format!("{:.4},{:.4}", round(coord.lat), round(coord.lng))
    }

    /// Look up a coordinate. Returns None if missing or expired.
    pub fn get(&self, coord: Coordinate) -> Option<GeocodedPlace> {
        let entry = self.entries.get(&Self::key(coord))?;
        let now = chrono::Utc::now().timestamp_millis();
        if now - entry.timestamp > CACHE_TTL_MS {
            return None;
        }
        Some(entry.to_place())
    }

    /// Store a geocoder answer and persist to disk.
    pub fn put(&mut self, place: &GeocodedPlace) {
        let entry = CacheEntry {
            lat: place.lat,
            lng: place.lng,
            country: place.country.clone(),
            region: place.region.clone(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            display_name: place.display_name.clone(),
        };
        self.entries.insert(Self::key(place.coordinate()), entry);
        self.persist();
    }

    /// Drop expired entries and persist. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let now = chrono::Utc::now().timestamp_millis();
        let before = self.entries.len();
        self.entries.retain(|_, e| now - e.timestamp <= CACHE_TTL_MS);
        let removed = before - self.entries.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    // Best effort: a read-only home directory must not break labelling.
    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("could not write cache {}: {}", self.path.display(), e);
                }
            }
            Err(e) => log::warn!("could not encode cache: {}", e),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    fn test_cache() -> (LocationCache, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        (LocationCache::load_from(path), dir)
    }

    fn sample(lat: f64, lng: f64) -> GeocodedPlace {
        GeocodedPlace {
            lat,
            lng,
            country: "México".into(),
            region: Some("Quintana Roo".into()),
            display_name: Some("Cancún, Quintana Roo, México".into()),
        }
    }

    #[test]
    fn test_cache_put_get() {
        let (mut cache, _dir) = test_cache();
        cache.put(&sample(21.1619, -86.8515));

        let result = cache.get(Coordinate::new(21.1619, -86.8515)).unwrap();
        assert_eq!(result.region.as_deref(), Some("Quintana Roo"));
        assert_relative_eq!(result.lat, 21.1619);
    }

    #[test]
    fn test_cache_key_rounding() {
        let (mut cache, _dir) = test_cache();
        cache.put(&sample(21.16191, -86.85149));
        assert!(cache.get(Coordinate::new(21.16189, -86.85152)).is_some());
        assert!(cache.get(Coordinate::new(21.1625, -86.8515)).is_none());
    }

    #[test]
    fn test_cache_key_negative_zero() {
        assert_eq!(
            LocationCache::key(Coordinate::new(-0.00001, 0.0)),
            LocationCache::key(Coordinate::new(0.0, -0.0))
        );
    }

    #[test]
    fn test_cache_miss() {
        let (cache, _dir) = test_cache();
        assert!(cache.get(Coordinate::new(1.0, 1.0)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_persistence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache.json");
        {
            let mut cache = LocationCache::load_from(path.clone());
            cache.put(&sample(19.4326, -99.1332));
        }
        let cache2 = LocationCache::load_from(path);
        assert_eq!(cache2.len(), 1);
        assert!(cache2.get(Coordinate::new(19.4326, -99.1332)).is_some());
    }

    #[test]
    fn test_cache_expired_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let json = r#"{
            "14.6349,-90.5069": {
                "lat": 14.6349, "lng": -90.5069,
                "country": "Guatemala", "region": "Guatemala",
                "timestamp": 0
            }
        }"#;
        fs::write(&path, json).unwrap();

        let mut cache = LocationCache::load_from(path);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(Coordinate::new(14.6349, -90.5069)).is_none());
        assert_eq!(cache.prune(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_keeps_missing_region_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        {
            let mut cache = LocationCache::load_from(path.clone());
            cache.put(&GeocodedPlace {
                lat: 13.5,
                lng: -91.8,
                country: "Guatemala".into(),
                region: None,
                display_name: None,
            });
        }
        let place = LocationCache::load_from(path).get(Coordinate::new(13.5, -91.8)).unwrap();
        assert_eq!(place.country, "Guatemala");
        assert!(place.region.is_none());
    }

    #[test]
    fn test_cache_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "not json").unwrap();
        assert!(LocationCache::load_from(path).is_empty());
    }
}
