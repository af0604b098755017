//! Label resolution for visit records.
//!
//! Provides the stored → cached → geocoded → built-in fallback chain,
//! a local cache of geocoder answers, and visit tallies per region.

pub mod cache;
pub mod providers;
pub mod resolver;
pub mod tally;
pub mod types;

pub use cache::LocationCache;
pub use resolver::LocationResolver;
pub use tally::{RegionTally, TallyRow};
pub use types::{
    canonical_country, GeocodedPlace, LocationError, LocationSource, ResolvedRegion, StoredAnnotation,
    UNKNOWN_COUNTRY_LABEL,
};
