//! Query-string shapes accepted by the proxy routes.
//!
//! Every field is a raw optional string so that the handlers, not the
//! extractor, decide which message a malformed value produces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ApodQuery {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarsPhotosParams {
    pub rover: Option<String>,
    pub sol: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub camera: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EpicQuery {
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoSearchQuery {
    pub query: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PhotoSearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// `configured` or `not configured`; the key itself is never echoed.
    pub nasa_api_key: String,
    pub environment: String,
    pub port: u16,
}
