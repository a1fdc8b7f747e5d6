use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One Astronomy Picture of the Day entry from `/planetary/apod`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Apod {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    /// `image` or `video`.
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Apod {
    pub fn is_video(&self) -> bool {
        self.media_type == "video"
    }

    /// Best URL to show for this entry: HD image, then the standard URL, then
    /// the video thumbnail.
    pub fn display_url(&self) -> Option<&str> {
        self.hdurl
            .as_deref()
            .or(self.url.as_deref())
            .or(self.thumbnail_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "date": "2023-01-01",
            "title": "Test APOD",
            "explanation": "Test explanation.",
            "media_type": "image",
            "url": "http://example.com/test.jpg",
            "hdurl": "http://example.com/test_hd.jpg",
            "resource": {"image_set": "apod"}
        });
        let apod: Apod = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(apod.display_url(), Some("http://example.com/test_hd.jpg"));
        assert_eq!(serde_json::to_value(&apod).unwrap(), raw);
    }

    #[test]
    fn video_entries_fall_back_to_url() {
        let apod: Apod = serde_json::from_value(json!({
            "date": "2023-02-02",
            "title": "A video",
            "media_type": "video",
            "url": "https://www.youtube.com/embed/xyz"
        }))
        .unwrap();
        assert!(apod.is_video());
        assert_eq!(apod.display_url(), Some("https://www.youtube.com/embed/xyz"));
        assert!(apod.explanation.is_empty());
    }

    #[test]
    fn missing_url_is_not_serialized_as_null() {
        let raw = json!({
            "date": "2023-03-03",
            "title": "Embedded video",
            "explanation": "No direct link.",
            "media_type": "other"
        });
        let apod: Apod = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(apod.url, None);
        let out = serde_json::to_value(&apod).unwrap();
        assert!(out.get("url").is_none());
        assert_eq!(out, raw);
    }
}
