//! Result models for inspection and conversion operations

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Embedded tag data attached to an inspection result: either a readable
/// mapping, or the text explaining why none is available. Tag extraction
/// failing never fails the inspection itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagView {
    Tags(BTreeMap<String, String>),
    Unavailable(String),
}

impl TagView {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        TagView::Unavailable(reason.into())
    }
}

/// Audio inspection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioInfo {
    #[serde(rename = "Duration (s)")]
    pub duration_secs: f64,
    #[serde(rename = "Channels")]
    pub channels: u16,
    #[serde(rename = "Frame Rate")]
    pub frame_rate: u32,
    #[serde(rename = "Sample Width")]
    pub sample_width: u16,
    #[serde(rename = "Metadata")]
    pub metadata: TagView,
}

/// Image inspection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    #[serde(rename = "Format")]
    pub format: String,
    #[serde(rename = "Mode")]
    pub mode: String,
    #[serde(rename = "Size")]
    pub size: (u32, u32),
    #[serde(rename = "Metadata")]
    pub metadata: TagView,
}

/// Result of a converting operation: where the output artifact landed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub artifact_id: String,
    pub path: PathBuf,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_info_serializes_with_display_keys() {
        let info = AudioInfo {
            duration_secs: 12.5,
            channels: 2,
            frame_rate: 44100,
            sample_width: 2,
            metadata: TagView::unavailable("no tag found"),
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["Duration (s)"], 12.5);
        assert_eq!(json["Channels"], 2);
        assert_eq!(json["Frame Rate"], 44100);
        assert_eq!(json["Sample Width"], 2);
        assert_eq!(json["Metadata"], "no tag found");
    }

    #[test]
    fn tag_view_serializes_untagged() {
        let mut map = BTreeMap::new();
        map.insert("title".to_string(), "Test".to_string());
        let json = serde_json::to_value(TagView::Tags(map)).unwrap();
        assert_eq!(json["title"], "Test");

        let json = serde_json::to_value(TagView::unavailable("No metadata found")).unwrap();
        assert_eq!(json, "No metadata found");
    }

    #[test]
    fn image_info_round_trips() {
        let info = ImageInfo {
            format: "PNG".to_string(),
            mode: "RGBA".to_string(),
            size: (640, 480),
            metadata: TagView::unavailable("No metadata found"),
        };

        let json = serde_json::to_string(&info).unwrap();
        let back: ImageInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.format, "PNG");
        assert_eq!(back.size, (640, 480));
        assert_eq!(back.metadata, info.metadata);
    }

    #[test]
    fn conversion_outcome_omits_absent_sample_rate() {
        let outcome = ConversionOutcome {
            artifact_id: "123-abcd".to_string(),
            path: PathBuf::from("./tmp/output-123-abcd.png"),
            format: "PNG".to_string(),
            sample_rate: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("sample_rate").is_none());
    }
}
