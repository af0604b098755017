use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::location::{ResolvedRegion, StoredAnnotation};
use crate::region::tables::{region_table, COUNTRY_BOXES};
use crate::region::{classify, region_names, BoundingBox, Coordinate, Country, LabelMode};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ─── GET /api/classify ───────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ClassifyQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub country: String,
    pub country_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub mode: LabelMode,
    pub formatted_coords: String,
}

pub async fn classify_point(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClassifyQuery>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let start = Instant::now();
    let coord = parse_coords(params.lat, params.lng)?;
    let mode = parse_mode(params.mode.as_deref(), state.default_mode)?;

    let result = classify(coord, mode);
    let country_label = if result.country.is_empty() {
        crate::location::UNKNOWN_COUNTRY_LABEL.to_string()
    } else {
        result.country.clone()
    };

    log::info!(
        "GET /api/classify {} mode={} -> {} / {} ({:.1}ms)",
        coord,
        mode,
        country_label,
        result.region.as_deref().unwrap_or("-"),
        elapsed_ms(start),
    );

    Ok(Json(ClassifyResponse {
        country: result.country,
        country_label,
        region: result.region,
        mode,
        formatted_coords: coord.to_string(),
    }))
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ResolveQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub country: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    #[serde(flatten)]
    pub resolved: ResolvedRegion,
    pub country_label: String,
}

pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let start = Instant::now();
    let coord = parse_coords(params.lat, params.lng)?;
    let stored = StoredAnnotation {
        country: params.country,
        state: params.state,
    };

    // The resolver may block on the geocoder.
    let shared = Arc::clone(&state);
    let resolved = tokio::task::spawn_blocking(move || shared.resolver().resolve(coord, &stored))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("resolver task failed: {}", e)))?;

    log::info!(
        "GET /api/resolve {} -> {} / {} [{}] ({:.1}ms)",
        coord,
        resolved.country_label(),
        resolved.region,
        resolved.source,
        elapsed_ms(start),
    );

    let country_label = resolved.country_label().to_string();
    Ok(Json(ResolveResponse { resolved, country_label }))
}

// ─── GET /api/countries ──────────────────────────────────────────

#[derive(Serialize)]
pub struct CountryInfo {
    pub priority: usize,
    pub name: &'static str,
    pub iso_code: &'static str,
    pub bounds: BoundingBox,
    pub has_regions: bool,
}

pub async fn country_list() -> Json<Vec<CountryInfo>> {
    Json(
        COUNTRY_BOXES
            .iter()
            .enumerate()
            .map(|(i, (country, bounds))| CountryInfo {
                priority: i + 1,
                name: country.name(),
                iso_code: country.iso_code(),
                bounds: *bounds,
                has_regions: region_table(*country).is_some(),
            })
            .collect(),
    )
}

// ─── GET /api/regions ────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RegionsQuery {
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub country: &'static str,
    pub regions: Vec<&'static str>,
}

pub async fn region_list(Query(params): Query<RegionsQuery>) -> Result<Json<RegionsResponse>, ApiError> {
    let raw = params.country.as_deref().unwrap_or("").trim();
    if raw.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'country' parameter"));
    }
    let country = Country::parse(raw)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown country '{}'", raw)))?;

    Ok(Json(RegionsResponse {
        country: country.name(),
        regions: region_names(country),
    }))
}

// ─── Helpers ─────────────────────────────────────────────────────

fn parse_coords(lat: Option<f64>, lng: Option<f64>) -> Result<Coordinate, ApiError> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(api_error(StatusCode::BAD_REQUEST, "Provide 'lat' and 'lng' parameters"));
    };
    let coord = Coordinate::new(lat, lng);
    if !coord.is_plausible() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid coordinates. Lat: -90..90, Lng: -180..180",
        ));
    }
    Ok(coord)
}

fn parse_mode(s: Option<&str>, default: LabelMode) -> Result<LabelMode, ApiError> {
    match s {
        None => Ok(default),
        Some(raw) => LabelMode::parse(raw).ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Unknown mode '{}'. Use 'listing' or 'heatmap'.", raw),
            )
        }),
    }
}
