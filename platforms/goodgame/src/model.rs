//! Wire types of the GoodGame APIs and their normalization.
//!
//! Field names and value vocabularies differ between API generations. Everything
//! past this module works with [`ChannelStream`] and [`StreamStatus`] only.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Identifier a channel lookup starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// Human readable channel name, as in `goodgame.ru/{username}`
    Username(String),
    /// Opaque player token, as in `goodgame.ru/player?{src}`
    PlayerToken(String),
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Username(username) => f.write_str(username),
            ChannelRef::PlayerToken(token) => f.write_str(token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStatus {
    Online,
    Offline,
    /// Anything outside the two expected values, kept for error reporting
    Unknown(String),
}

impl StreamStatus {
    /// `online` of API v4. A missing field counts as online.
    pub fn from_v4(online: &Value) -> Self {
        match online {
            Value::Bool(true) | Value::Null => Self::Online,
            Value::Bool(false) => Self::Offline,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// `status` of the legacy API. The field is required.
    pub fn from_legacy(status: &Value) -> Self {
        match status.as_str() {
            Some("Live") => Self::Online,
            Some("Dead") => Self::Offline,
            _ => Self::Unknown(status.to_string()),
        }
    }
}

/// Channel info normalized across API generations.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStream {
    pub username: Option<String>,
    pub stream_key: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub status: StreamStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Streamer {
    pub username: Option<String>,
}

/// `api/4/streams/2/username/{username}` and `api/4/streams/2/id/{id}`
#[derive(Debug, Deserialize)]
pub struct StreamV4 {
    #[serde(rename = "streamKey")]
    pub stream_key: Option<String>,
    pub title: Option<String>,
    pub preview: Option<String>,
    #[serde(default)]
    pub online: Value,
    pub streamer: Option<Streamer>,
}

impl StreamV4 {
    pub fn streamer_username(&self) -> Option<&str> {
        self.streamer.as_ref()?.username.as_deref()
    }

    pub fn into_channel(self, username: Option<String>) -> ChannelStream {
        ChannelStream {
            username: username.or_else(|| self.streamer_username().map(str::to_string)),
            status: StreamStatus::from_v4(&self.online),
            stream_key: self.stream_key,
            title: self.title,
            thumbnail: self.preview,
        }
    }
}

/// `api/player?src={token}`
#[derive(Debug, Deserialize)]
pub struct PlayerInfo {
    pub channel_id: Option<StringOrNumber>,
    pub channel_key: Option<String>,
}

/// One entry of `api/getchannelstatus?id={username}&fmt=json`
#[derive(Debug, Deserialize)]
pub struct LegacyChannel {
    pub stream_id: Option<StringOrNumber>,
    #[serde(alias = "key")]
    pub channel_key: Option<String>,
    #[serde(rename = "streamkey")]
    pub stream_key: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub status: Value,
    pub thumb: Option<String>,
    pub embed: Option<String>,
}

impl LegacyChannel {
    /// The legacy API only exposes the stream key inside the embed player markup.
    pub fn stream_key(&self) -> Option<String> {
        self.stream_key
            .clone()
            .or_else(|| scrape_stream_key(self.embed.as_deref()?))
    }

    pub fn into_channel(self, username: Option<String>) -> ChannelStream {
        ChannelStream {
            stream_key: self.stream_key(),
            username: username.or(self.channel_key),
            status: StreamStatus::from_legacy(&self.status),
            title: self.title,
            thumbnail: self.thumb,
        }
    }
}

/// Pick the channel out of a `getchannelstatus` response.
///
/// The response is an object keyed by stream id. Unknown channels come back
/// as an empty array or object.
pub fn legacy_channel_from_status(value: Value) -> Result<Option<LegacyChannel>, serde_json::Error> {
    let Value::Object(map) = value else {
        return Ok(None);
    };
    match map.into_iter().next() {
        Some((_, channel)) => serde_json::from_value(channel).map(Some),
        None => Ok(None),
    }
}

static EMBED_STREAM_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"player\?([^"&#'\s<>]+)"#).expect("valid embed regex"));

pub fn scrape_stream_key(embed: &str) -> Option<String> {
    EMBED_STREAM_KEY
        .captures(embed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StringOrNumber {
    String(String),
    Number(u64),
}

impl fmt::Display for StringOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringOrNumber::String(s) => f.write_str(s),
            StringOrNumber::Number(n) => write!(f, "{n}"),
        }
    }
}

/// `storage2.goodgame.ru/api/json/channel/video?streamId={stream_key}`
#[derive(Debug, Deserialize)]
pub struct VodList {
    #[serde(default)]
    pub vods: Vec<Vod>,
}

#[derive(Debug, Deserialize)]
pub struct Vod {
    pub moddate: String,
    pub m3u8path: Option<String>,
    pub mp4path: Option<String>,
    /// Object of preview paths, or an empty array when there are none
    #[serde(default)]
    pub previewpath: Value,
}

impl Vod {
    pub fn preview(&self, key: &str) -> Option<&str> {
        self.previewpath
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// `api/4/clips/2/{id}`
#[derive(Debug, Deserialize)]
pub struct Clip {
    pub title: Option<String>,
    pub stream: Option<ClipStream>,
    pub author: Option<Streamer>,
    pub thumbnail: Option<String>,
    pub views: Option<u64>,
    #[serde(default)]
    pub created: Value,
    pub src: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClipStream {
    pub streamer: Option<Streamer>,
}

impl Clip {
    pub fn creator(&self) -> Option<String> {
        self.stream.as_ref()?.streamer.as_ref()?.username.clone()
    }

    pub fn uploader(&self) -> Option<String> {
        self.author.as_ref()?.username.clone()
    }

    pub fn timestamp(&self) -> Option<i64> {
        match &self.created {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}
