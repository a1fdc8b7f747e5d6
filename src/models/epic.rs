use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Public archive that serves the natural-colour EPIC images.
pub const EPIC_ARCHIVE_URL: &str = "https://epic.gsfc.nasa.gov/archive/natural";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `/EPIC/api/natural/date/{date}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EpicImage {
    pub identifier: String,
    #[serde(default)]
    pub caption: String,
    /// File stem, e.g. `epic_1b_20230101003633`.
    pub image: String,
    #[serde(default)]
    pub version: String,
    /// Capture timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid_coordinates: Option<Coordinates>,
    /// Filled in by the proxy; absent upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
