//! Reverse geocoding via OpenStreetMap Nominatim.

use serde::Deserialize;
use std::time::Duration;

use super::types::{canonical_country, GeocodedPlace, LocationError};
use crate::region::{Coordinate, Country};

const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const USER_AGENT: &str = "fieldgeo/0.3 (field-visit labelling)";
const TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NominatimAddress {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NominatimReverse {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
    /// Set instead of `address` when nothing is found (e.g. open ocean).
    #[serde(default)]
    pub error: Option<String>,
}

/// Reverse-geocode a coordinate. Country names are requested in Spanish.
pub fn nominatim_reverse(coord: Coordinate) -> Result<GeocodedPlace, LocationError> {
    let url = format!(
        "{}?lat={}&lon={}&format=json&zoom=5&addressdetails=1&accept-language=es",
        NOMINATIM_REVERSE_URL, coord.lat, coord.lng
    );

    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .timeout(TIMEOUT)
        .call()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    let body: NominatimReverse = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    from_reverse(coord, body)
}

/// Turn a Nominatim reply into a `GeocodedPlace`.
///
/// The ISO code wins over the localized name when both are present. A reply
/// without a first-level subdivision leaves `region` empty.
pub fn from_reverse(coord: Coordinate, body: NominatimReverse) -> Result<GeocodedPlace, LocationError> {
    if let Some(err) = body.error {
        log::debug!("nominatim: {} at {}", err, coord);
        return Err(LocationError::NotFound(coord));
    }
    let address = body
        .address
        .ok_or_else(|| LocationError::InvalidResponse("no address field".into()))?;

    let country = address
        .country_code
        .as_deref()
        .and_then(Country::parse)
        .map(|c| c.name().to_string())
        .or_else(|| address.country.as_deref().map(canonical_country))
        .filter(|c| !c.is_empty())
        .ok_or(LocationError::NotFound(coord))?;

    let region = [address.state, address.province, address.region]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty());

    Ok(GeocodedPlace {
        lat: coord.lat,
        lng: coord.lng,
        country,
        region,
        display_name: body.display_name,
    })
}
