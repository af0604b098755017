//! Offline country/region classification from static bounding boxes.
//!
//! Used as the last fallback when a visit carries no stored or geocoded
//! country/state. Results are display labels, not authoritative geodata.

pub mod classifier;
pub mod tables;
pub mod types;

pub use classifier::{
    classify, classify_country, classify_region, classify_region_with, region_names,
    GUATEMALA_CAPITAL_REGION, MEXICO_OTHER_REGION,
};
pub use types::{
    BoundingBox, ClassificationResult, Coordinate, Country, LabelMode, DETECTED_REGION_LABEL,
};
