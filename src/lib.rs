//! fieldgeo: country and region labels for GPS-tagged field visits.
//!
//! `region` is the pure bounding-box classifier. `location` wraps it in the
//! fallback chain callers actually use (stored annotation, cache, reverse
//! geocoder, classifier). `server` exposes both over HTTP.

pub mod location;
pub mod region;
pub mod server;
