use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Rovers served by the Mars Rover Photos API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rover {
    Curiosity,
    Opportunity,
    Spirit,
    Perseverance,
}

impl Rover {
    pub const ALL: [Rover; 4] = [
        Rover::Curiosity,
        Rover::Perseverance,
        Rover::Spirit,
        Rover::Opportunity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rover::Curiosity => "curiosity",
            Rover::Opportunity => "opportunity",
            Rover::Spirit => "spirit",
            Rover::Perseverance => "perseverance",
        }
    }

    /// Camera abbreviations accepted by the API for this rover.
    pub fn cameras(&self) -> &'static [&'static str] {
        match self {
            Rover::Curiosity => &["FHAZ", "RHAZ", "MAST", "CHEMCAM", "MAHLI", "MARDI", "NAVCAM"],
            Rover::Opportunity | Rover::Spirit => &["FHAZ", "RHAZ", "NAVCAM", "PANCAM", "MINITES"],
            Rover::Perseverance => &[
                "EDL_RUCAM",
                "EDL_DDCAM",
                "NAVCAM_LEFT",
                "NAVCAM_RIGHT",
                "MCZ_LEFT",
                "MCZ_RIGHT",
                "FRONT_HAZCAM_LEFT_A",
                "REAR_HAZCAM_LEFT",
                "SKYCAM",
                "SHERLOC_WATSON",
            ],
        }
    }
}

impl fmt::Display for Rover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rover {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "curiosity" => Ok(Rover::Curiosity),
            "opportunity" => Ok(Rover::Opportunity),
            "spirit" => Ok(Rover::Spirit),
            "perseverance" => Ok(Rover::Perseverance),
            other => Err(AppError::InvalidParameter(format!(
                "Unknown rover '{other}'. Must be one of: curiosity, perseverance, spirit, opportunity"
            ))),
        }
    }
}

/// Parameters for one page of rover photos.
#[derive(Debug, Clone, PartialEq)]
pub struct MarsPhotoQuery {
    pub rover: Rover,
    pub sol: u32,
    pub page: u32,
    pub per_page: u32,
    /// Camera abbreviation; `None` means every camera.
    pub camera: Option<String>,
}

impl MarsPhotoQuery {
    pub fn new(rover: Rover, sol: u32) -> Self {
        Self {
            rover,
            sol,
            page: 1,
            per_page: 12,
            camera: None,
        }
    }

    /// Sets the camera filter. `"all"` (any case) and blanks clear it.
    pub fn with_camera(mut self, camera: Option<&str>) -> Self {
        self.camera = camera
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(str::to_uppercase);
        self
    }

    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.max(1);
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MarsCamera {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rover_id: Option<u64>,
    pub full_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MarsRoverInfo {
    pub id: u64,
    pub name: String,
    pub landing_date: String,
    pub launch_date: String,
    pub status: String,
    /// `max_sol`, `max_date`, `total_photos` and whatever else the API adds.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MarsPhoto {
    pub id: u64,
    pub sol: u32,
    pub camera: MarsCamera,
    pub img_src: String,
    pub earth_date: String,
    pub rover: MarsRoverInfo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw body of `/mars-photos/api/v1/rovers/{rover}/photos`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MarsPhotosResponse {
    #[serde(default)]
    pub photos: Vec<MarsPhoto>,
    /// Not sent by every deployment of the API.
    #[serde(default)]
    pub total_photos: Option<u64>,
}

/// Reshaped page returned by `/api/mars-photos`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MarsPhotoPage {
    pub photos: Vec<MarsPhoto>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}
