//! HTTP handlers for the proxy routes.
//!
//! Each handler validates its parameters, makes the outbound call through the
//! shared `NasaClient`, and reshapes the result via `crate::service`.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use tracing::{info, warn};

use super::dto::{
    ApodQuery, DateRangeQuery, EpicQuery, HealthResponse, MarsPhotosParams, PhotoSearchQuery,
    VideoSearchQuery,
};
use super::error::ApiError;
use super::state::AppState;
use crate::models::{
    Apod, EpicImage, LibraryPhoto, MarsPhotoPage, MarsPhotoQuery, MediaType, NeoDaySummary,
    NeoFeed, PhotoPage, Rover, VideoPage,
};
use crate::service;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, ApiError>;

const DEFAULT_MARS_LIMIT: u32 = 12;
const DEFAULT_VIDEO_LIMIT: u32 = 10;

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses an optional positive integer, falling back to `default` when absent.
fn positive_or(raw: Option<String>, default: u32, name: &str) -> Result<u32, ApiError> {
    match non_blank(raw) {
        None => Ok(default),
        Some(v) => match v.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ApiError::bad_request(format!(
                "{name} must be a positive integer"
            ))),
        },
    }
}

fn invalid_apod_date() -> ApiError {
    ApiError::bad_request("Invalid date")
        .with_details("Date must be valid and cannot be in the future")
}

/// Parses a date for APOD and rejects days outside the archive.
fn apod_date(raw: &str, malformed: impl FnOnce() -> ApiError) -> Result<NaiveDate, ApiError> {
    let date = service::parse_date(raw).map_err(|_| malformed())?;
    if !service::is_valid_apod_date(date, service::today_utc()) {
        info!("Invalid date requested: {}", raw);
        return Err(invalid_apod_date());
    }
    Ok(date)
}

fn required_range(
    query: DateRangeQuery,
    max_days: Option<i64>,
) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let (Some(start), Some(end)) = (non_blank(query.start_date), non_blank(query.end_date)) else {
        return Err(ApiError::bad_request("Start date and end date are required"));
    };
    service::parse_date_range(&start, &end, max_days)
        .map_err(|e| ApiError::from_app("Invalid date range", e))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health, GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let nasa_api_key = if state.config.api_key_configured() {
        "configured"
    } else {
        "not configured"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        nasa_api_key: nasa_api_key.to_string(),
        environment: state.config.environment.clone(),
        port: state.config.port,
    })
}

// =============================================================================
// APOD
// =============================================================================

/// GET /api/apod[?date=YYYY-MM-DD]
pub async fn get_apod(
    State(state): State<AppState>,
    Query(query): Query<ApodQuery>,
) -> HandlerResult<Apod> {
    let date = match non_blank(query.date) {
        Some(raw) => Some(apod_date(&raw, || {
            ApiError::bad_request("Invalid date format. Please use YYYY-MM-DD.")
        })?),
        None => None,
    };

    let apod = state
        .client
        .get_apod(date)
        .await
        .map_err(|e| ApiError::from_app("Failed to fetch APOD data", e))?;
    Ok(Json(apod))
}

/// GET /api/apod/date/{date}
pub async fn get_apod_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> HandlerResult<Apod> {
    let date = apod_date(&date, || {
        info!("Invalid date requested: {}", date);
        invalid_apod_date()
    })?;

    let apod = state
        .client
        .get_apod(Some(date))
        .await
        .map_err(|e| ApiError::from_app("Failed to fetch APOD data", e))?;
    Ok(Json(apod))
}

/// GET /api/apod/range?start_date&end_date
pub async fn get_apod_range(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<Vec<Apod>> {
    let (start, end) = required_range(query, None)?;
    if !service::is_valid_apod_date(start, service::today_utc())
        || !service::is_valid_apod_date(end, service::today_utc())
    {
        return Err(invalid_apod_date());
    }

    let entries = state
        .client
        .get_apod_range(start, end)
        .await
        .map_err(|e| ApiError::from_app("Failed to fetch APOD data", e))?;
    Ok(Json(entries))
}

// =============================================================================
// Mars Rover Photos
// =============================================================================

/// GET /api/mars-photos?rover&sol[&page=1][&limit=12][&camera]
///
/// Photos are de-duplicated by id before they are returned.
pub async fn get_mars_photos(
    State(state): State<AppState>,
    Query(params): Query<MarsPhotosParams>,
) -> HandlerResult<MarsPhotoPage> {
    let (Some(rover), Some(sol)) = (non_blank(params.rover), non_blank(params.sol)) else {
        return Err(ApiError::bad_request("Rover and sol parameters are required"));
    };

    let rover: Rover = rover
        .parse()
        .map_err(|e| ApiError::from_app("Invalid rover", e))?;
    let sol: u32 = sol
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request("sol must be a non-negative integer"))?;
    let page = positive_or(params.page, 1, "page")?;
    let limit = positive_or(params.limit, DEFAULT_MARS_LIMIT, "limit")?;

    let query = MarsPhotoQuery::new(rover, sol)
        .with_page(page, limit)
        .with_camera(params.camera.as_deref());

    let response = state
        .client
        .get_mars_photos(&query)
        .await
        .map_err(|e| ApiError::from_app("Failed to fetch Mars photos", e))?;

    Ok(Json(service::mars_photo_page(response, page, limit)))
}

// =============================================================================
// Near-Earth Objects
// =============================================================================

/// GET /api/neo?start_date&end_date
pub async fn get_neo(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<NeoFeed> {
    let (start, end) = required_range(query, Some(service::NEO_MAX_RANGE_DAYS))?;

    let feed = state
        .client
        .get_neo_feed(start, end)
        .await
        .map_err(|e| ApiError::from_app("Failed to fetch NEO data", e))?;
    info!("Successfully fetched NEO data");
    Ok(Json(feed))
}

/// GET /api/neo/summary?start_date&end_date
pub async fn get_neo_summary(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> HandlerResult<Vec<NeoDaySummary>> {
    let (start, end) = required_range(query, Some(service::NEO_MAX_RANGE_DAYS))?;

    let feed = state
        .client
        .get_neo_feed(start, end)
        .await
        .map_err(|e| ApiError::from_app("Failed to fetch NEO data", e))?;
    Ok(Json(service::neo_daily_summary(&feed)))
}

// =============================================================================
// EPIC
// =============================================================================

/// GET /api/epic?date
pub async fn get_epic(
    State(state): State<AppState>,
    Query(query): Query<EpicQuery>,
) -> HandlerResult<Vec<EpicImage>> {
    let Some(raw) = non_blank(query.date) else {
        return Err(ApiError::bad_request("Date parameter is required"));
    };
    let date = service::parse_date(&raw).map_err(|e| ApiError::from_app("Invalid date", e))?;

    let images = state
        .client
        .get_epic_images(date)
        .await
        .map_err(|e| ApiError::from_app("Failed to fetch EPIC data", e))?;
    info!("Successfully fetched EPIC data");
    Ok(Json(service::epic_with_urls(images, date)))
}

// =============================================================================
// Image and Video Library
// =============================================================================

/// GET /api/nasa-videos[?query][&page=1][&limit=10]
pub async fn get_nasa_videos(
    State(state): State<AppState>,
    Query(query): Query<VideoSearchQuery>,
) -> HandlerResult<VideoPage> {
    let page = positive_or(query.page, 1, "page")?;
    let limit = positive_or(query.limit, DEFAULT_VIDEO_LIMIT, "limit")?;
    let search =
        non_blank(query.query).unwrap_or_else(|| service::DEFAULT_VIDEO_QUERY.to_string());

    let response = state
        .client
        .search_library(&search, MediaType::Video, page, Some(limit))
        .await
        .map_err(|e| ApiError::from_app("Failed to fetch NASA videos", e))?;

    let total = response.total_hits();
    let videos = service::resolve_videos(&state.client, response).await;

    Ok(Json(VideoPage {
        videos,
        total,
        page,
        limit,
    }))
}

/// Runs an image search, degrading every failure to an empty page.
async fn search_photos_or_empty(state: &AppState, query: PhotoSearchQuery) -> PhotoPage {
    let search =
        non_blank(query.q).unwrap_or_else(|| service::DEFAULT_PHOTO_QUERY.to_string());
    let page = positive_or(query.page, 1, "page").unwrap_or(1);

    match state
        .client
        .search_library(&search, MediaType::Image, page, None)
        .await
    {
        Ok(response) => service::library_photos(&response),
        Err(e) => {
            warn!("Returning empty photo page for query {}: {}", search, e);
            PhotoPage::default()
        },
    }
}

/// An unreadable query string on a defensive route means the defaults.
fn photo_query_or_default(
    query: Result<Query<PhotoSearchQuery>, QueryRejection>,
) -> PhotoSearchQuery {
    match query {
        Ok(Query(query)) => query,
        Err(e) => {
            warn!("Ignoring malformed photo search query: {}", e);
            PhotoSearchQuery::default()
        },
    }
}

/// GET /api/nasa-photos[?q=apollo][&page=1]
///
/// Never fails: rate limiting, access errors and malformed responses all
/// produce `{"photos": [], "total_hits": 0}`.
pub async fn get_nasa_photos(
    State(state): State<AppState>,
    query: Result<Query<PhotoSearchQuery>, QueryRejection>,
) -> Json<PhotoPage> {
    let query = photo_query_or_default(query);
    Json(search_photos_or_empty(&state, query).await)
}

/// GET /api/nasa-photos/random[?q=apollo]
///
/// One photo picked from the first page of results, or `null`.
pub async fn get_random_nasa_photo(
    State(state): State<AppState>,
    query: Result<Query<PhotoSearchQuery>, QueryRejection>,
) -> Json<Option<LibraryPhoto>> {
    let query = PhotoSearchQuery {
        q: photo_query_or_default(query).q,
        page: None,
    };
    let page = search_photos_or_empty(&state, query).await;
    Json(service::random_photo(&page, &mut rand::thread_rng()))
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
