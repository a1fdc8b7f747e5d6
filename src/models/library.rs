//! Image and Video Library (`images-api.nasa.gov`) search payloads and the
//! flattened shapes the proxy hands to clients.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

/// Body of `/search`. Every level is optional so that an unexpected shape
/// degrades to "no results" instead of a parse failure.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub collection: Option<Collection>,
}

impl SearchResponse {
    pub fn items(&self) -> &[SearchItem] {
        self.collection
            .as_ref()
            .map(|c| c.items.as_slice())
            .unwrap_or_default()
    }

    pub fn total_hits(&self) -> u64 {
        self.collection
            .as_ref()
            .and_then(|c| c.metadata.as_ref())
            .map(|m| m.total_hits)
            .unwrap_or(0)
    }

    pub fn into_items(self) -> Vec<SearchItem> {
        self.collection.map(|c| c.items).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Collection {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    #[serde(default)]
    pub metadata: Option<CollectionMetadata>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CollectionMetadata {
    #[serde(default)]
    pub total_hits: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SearchItem {
    /// URL of the item's asset manifest (a JSON array of file URLs).
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub data: Vec<ItemData>,
    #[serde(default)]
    pub links: Vec<ItemLink>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ItemData {
    pub nasa_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_created: Option<String>,
    pub center: Option<String>,
    pub photographer: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ItemLink {
    pub href: String,
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub render: Option<String>,
}

/// Descriptive blurbs attached to every library photo.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AiInsights {
    pub visual_analysis: String,
    pub historical_context: String,
    pub artistic_interpretation: String,
}

impl Default for AiInsights {
    fn default() -> Self {
        Self {
            visual_analysis: "Analyzing visual elements and composition...".to_string(),
            historical_context: "Providing historical context...".to_string(),
            artistic_interpretation: "Interpreting artistic elements...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LibraryPhoto {
    pub nasa_id: String,
    pub title: String,
    pub description: String,
    pub date_created: String,
    pub center: String,
    pub photographer: String,
    pub keywords: Vec<String>,
    pub thumbnail_url: String,
    pub ai_insights: AiInsights,
}

/// Body of `/api/nasa-photos`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct PhotoPage {
    pub photos: Vec<LibraryPhoto>,
    pub total_hits: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LibraryVideo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_created: String,
    pub keywords: Vec<String>,
    pub thumbnail: String,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    pub duration: String,
    pub center: String,
    pub photographer: String,
    pub location: String,
}

/// Body of `/api/nasa-videos`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct VideoPage {
    pub videos: Vec<LibraryVideo>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}
