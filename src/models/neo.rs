use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Body of `/neo/rest/v1/feed`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NeoFeed {
    #[serde(default)]
    pub links: Map<String, Value>,
    #[serde(default)]
    pub element_count: u64,
    /// Objects keyed by close-approach date (`YYYY-MM-DD`).
    #[serde(default)]
    pub near_earth_objects: BTreeMap<String, Vec<NearEarthObject>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude_h: Option<f64>,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NearEarthObject {
    /// Mean of the min/max kilometre diameter estimate.
    pub fn mean_diameter_km(&self) -> Option<f64> {
        self.estimated_diameter
            .as_ref()
            .and_then(|d| d.kilometers.as_ref())
            .map(|r| (r.estimated_diameter_min + r.estimated_diameter_max) / 2.0)
    }

    /// Miss distance of the first close approach, in kilometres.
    pub fn miss_distance_km(&self) -> Option<f64> {
        self.close_approach_data
            .first()
            .and_then(|a| a.miss_distance.get("kilometers"))
            .and_then(|v| v.parse().ok())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimatedDiameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers: Option<DiameterRange>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// NASA sends the numeric fields of a close approach as strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloseApproach {
    #[serde(default)]
    pub close_approach_date: String,
    #[serde(default)]
    pub relative_velocity: BTreeMap<String, String>,
    #[serde(default)]
    pub miss_distance: BTreeMap<String, String>,
    #[serde(default)]
    pub orbiting_body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-day counts returned by `/api/neo/summary`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NeoDaySummary {
    pub date: String,
    pub total: usize,
    pub hazardous: usize,
    pub non_hazardous: usize,
}
