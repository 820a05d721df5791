use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Generic description of a resolvable media item.
///
/// Extractors fill either `formats` or `url`, never leave both empty.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MediaInfo {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,

    pub title: String,

    /// Channel owner of the media
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// User who published the media, when it differs from the channel owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnails: Vec<Thumbnail>,

    pub is_live: bool,

    /// Playable formats, best first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<Format>,

    /// Direct media URL for items without a format list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,

    /// Unix timestamp in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Format {
    pub format_id: String,
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,

    /// m3u8, https
    pub protocol: String,
    pub ext: String,

    /// Total bitrate, in kbit/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbr: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcodec: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub acodec: Option<String>,
}

impl Format {
    fn quality_cmp(&self, other: &Self) -> Ordering {
        self.height
            .cmp(&other.height)
            .then_with(|| {
                self.tbr
                    .unwrap_or_default()
                    .total_cmp(&other.tbr.unwrap_or_default())
            })
            .then_with(|| {
                self.fps
                    .unwrap_or_default()
                    .total_cmp(&other.fps.unwrap_or_default())
            })
    }
}

/// Sort formats by quality, best first.
///
/// Height is compared first, then bitrate and frame rate. The sort is stable,
/// so formats of equal quality keep their manifest order.
pub fn sort_formats(formats: &mut [Format]) {
    formats.sort_by(|a, b| b.quality_cmp(a));
}
