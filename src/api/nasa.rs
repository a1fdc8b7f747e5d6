//! Provides a client for NASA's public REST APIs.
//!
//! `api.nasa.gov` hosts APOD, Mars Rover Photos, NEO and EPIC and requires an
//! `api_key` query parameter. The Image and Video Library on
//! `images-api.nasa.gov` is keyless.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Apod, EpicImage, MarsPhotoQuery, MarsPhotosResponse, MediaType, NeoFeed, SearchResponse,
};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Wire format for every date parameter the NASA APIs accept.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const USER_AGENT: &str = concat!("nasa-explorer/", env!("CARGO_PKG_VERSION"));

/// An asynchronous client for NASA's APIs. Cheap to share behind an `Arc`;
/// the underlying connection pool is reused across requests.
#[derive(Debug, Clone)]
pub struct NasaClient {
    client: Client,
    api_key: String,
    api_base_url: String,
    images_base_url: String,
}

impl NasaClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_urls(
            config.nasa_api_key.clone(),
            &config.api_base_url,
            &config.images_base_url,
            config.request_timeout,
        )
    }

    /// Creates a client with custom hosts, e.g. a mock server in tests.
    pub fn with_base_urls(
        api_key: String,
        api_base_url: &str,
        images_base_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            images_base_url: images_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the Astronomy Picture of the Day, for `date` or for today.
    pub async fn get_apod(&self, date: Option<NaiveDate>) -> Result<Apod> {
        let api_key = self.require_api_key()?;
        info!("Fetching APOD for {}", describe_date(date));

        let mut query = vec![("api_key", api_key.to_string())];
        if let Some(date) = date {
            query.push(("date", date.format(DATE_FORMAT).to_string()));
        }

        let url = format!("{}/planetary/apod", self.api_base_url);
        self.get_json(&url, &query, "APOD").await
    }

    /// Fetches every APOD between `start` and `end`, inclusive.
    pub async fn get_apod_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Apod>> {
        let api_key = self.require_api_key()?;
        info!("Fetching APOD range {} to {}", start, end);

        let query = [
            ("api_key", api_key.to_string()),
            ("start_date", start.format(DATE_FORMAT).to_string()),
            ("end_date", end.format(DATE_FORMAT).to_string()),
        ];

        let url = format!("{}/planetary/apod", self.api_base_url);
        let entries: Vec<Apod> = self.get_json(&url, &query, "APOD range").await?;
        debug!("Received {} APOD entries", entries.len());
        Ok(entries)
    }

    /// Fetches one page of photos taken by a rover on a given sol.
    pub async fn get_mars_photos(&self, params: &MarsPhotoQuery) -> Result<MarsPhotosResponse> {
        let api_key = self.require_api_key()?;
        info!(
            "Fetching Mars photos for rover: {}, sol: {}, page: {}, limit: {}",
            params.rover, params.sol, params.page, params.per_page
        );

        let mut query = vec![
            ("sol", params.sol.to_string()),
            ("api_key", api_key.to_string()),
            ("page", params.page.to_string()),
            ("per_page", params.per_page.to_string()),
        ];
        if let Some(camera) = &params.camera {
            query.push(("camera", camera.clone()));
        }

        let url = format!(
            "{}/mars-photos/api/v1/rovers/{}/photos",
            self.api_base_url, params.rover
        );
        let response: MarsPhotosResponse = self.get_json(&url, &query, "Mars photos").await?;
        debug!("Received {} Mars photos", response.photos.len());
        Ok(response)
    }

    /// Fetches the Near-Earth Object feed for a date window.
    pub async fn get_neo_feed(&self, start: NaiveDate, end: NaiveDate) -> Result<NeoFeed> {
        let api_key = self.require_api_key()?;
        info!("Fetching NEO data for dates: {} to {}", start, end);

        let query = [
            ("start_date", start.format(DATE_FORMAT).to_string()),
            ("end_date", end.format(DATE_FORMAT).to_string()),
            ("api_key", api_key.to_string()),
        ];

        let url = format!("{}/neo/rest/v1/feed", self.api_base_url);
        let feed: NeoFeed = self.get_json(&url, &query, "NEO").await?;
        debug!("Received {} near-earth objects", feed.element_count);
        Ok(feed)
    }

    /// Fetches metadata for the natural-colour EPIC images of one day.
    pub async fn get_epic_images(&self, date: NaiveDate) -> Result<Vec<EpicImage>> {
        let api_key = self.require_api_key()?;
        info!("Fetching EPIC data for date: {}", date);

        let url = format!(
            "{}/EPIC/api/natural/date/{}",
            self.api_base_url,
            date.format(DATE_FORMAT)
        );
        let images: Vec<EpicImage> = self
            .get_json(&url, &[("api_key", api_key.to_string())], "EPIC")
            .await?;
        debug!("Received {} EPIC images", images.len());
        Ok(images)
    }

    /// Searches the Image and Video Library.
    pub async fn search_library(
        &self,
        query: &str,
        media_type: MediaType,
        page: u32,
        page_size: Option<u32>,
    ) -> Result<SearchResponse> {
        info!(
            "Searching NASA library for {}s matching: {}, page: {}",
            media_type.as_str(),
            query,
            page
        );

        let mut params = vec![
            ("q", query.to_string()),
            ("media_type", media_type.as_str().to_string()),
            ("page", page.to_string()),
        ];
        if let Some(size) = page_size {
            params.push(("page_size", size.to_string()));
        }

        let url = format!("{}/search", self.images_base_url);
        let response: SearchResponse = self.get_json(&url, &params, "NASA library").await?;
        debug!(
            "Found {} items ({} total hits) for query: {}",
            response.items().len(),
            response.total_hits(),
            query
        );
        Ok(response)
    }

    /// Fetches an asset manifest: the list of file URLs behind one library item.
    pub async fn get_asset_manifest(&self, manifest_url: &str) -> Result<Vec<String>> {
        debug!("Fetching asset manifest {}", manifest_url);
        self.get_json(manifest_url, &[], "asset manifest").await
    }

    fn require_api_key(&self) -> Result<&str> {
        if self.api_key.is_empty() {
            error!("NASA API key is not configured");
            return Err(AppError::MissingApiKey);
        }
        Ok(&self.api_key)
    }

    /// Issues a GET and decodes a JSON body.
    ///
    /// Non-success statuses become `AppError::Upstream` carrying NASA's body.
    /// The request URL is never logged because it contains the API key.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Error fetching {} data: {}", what, e);
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            error!("NASA {} request failed with status {}: {}", what, status, body);

            match status {
                StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
                    warn!("Received {}. Check NASA_API_KEY validity; DEMO_KEY has restrictions.", status)
                },
                StatusCode::TOO_MANY_REQUESTS => {
                    warn!("NASA API rate limit exceeded. Please try again later.")
                },
                _ => {},
            }

            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            error!("Error reading {} response body: {}", what, e);
            AppError::from(e)
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Error parsing {} response JSON: {}", what, e);
            AppError::from(e)
        })
    }
}

fn describe_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "today".to_string())
}
