use hikari::{
    hls::extract_m3u8_formats, ExtractError, ExtractResult, MediaInfo, Thumbnail, UpstreamError,
    Url,
};

use crate::{config::ApiGeneration, constants::THUMBNAIL_KEYS, GoodGameClient};

impl GoodGameClient {
    /// Resolve the recording of `stream_key` that was last modified at `timestamp`.
    pub async fn resolve_vod(&self, stream_key: &str, timestamp: &str) -> ExtractResult<MediaInfo> {
        let video_id = format!("{stream_key}/{timestamp}");

        let vods = self.vods(stream_key).await?;
        let vod = vods
            .vods
            .into_iter()
            .find(|vod| vod.moddate == timestamp)
            .ok_or_else(|| ExtractError::NotFound(video_id.clone()))?;

        let mut formats = Vec::new();
        if let Some(m3u8_path) = &vod.m3u8path {
            match self.storage_url(m3u8_path) {
                Ok(manifest_url) => match extract_m3u8_formats(&self.client, manifest_url).await {
                    Ok(found) => formats = found,
                    Err(e) => log::warn!("[{video_id}] Unable to extract vod formats: {e}"),
                },
                Err(e) => log::warn!("[{video_id}] Invalid vod manifest path {m3u8_path}: {e}"),
            }
        }

        let thumbnails = THUMBNAIL_KEYS
            .iter()
            .enumerate()
            .filter_map(|(preference, key)| {
                let url = self.storage_url(vod.preview(key)?).ok()?;
                Some(Thumbnail {
                    url: url.to_string(),
                    preference: Some(preference as i32),
                })
            })
            .collect();

        let url = if formats.is_empty() {
            let mp4_path = vod.mp4path.as_deref().ok_or_else(|| {
                ExtractError::upstream(&video_id, UpstreamError::MissingField("mp4path"))
            })?;
            Some(
                self.storage_url(mp4_path)
                    .map_err(|e| ExtractError::upstream(&video_id, e))?
                    .to_string(),
            )
        } else {
            None
        };

        let creator = self.creator_by_stream_key(stream_key).await?;

        Ok(MediaInfo {
            id: video_id,
            title: timestamp.to_string(),
            creator,
            thumbnails,
            is_live: false,
            formats,
            url,
            ..Default::default()
        })
    }

    async fn creator_by_stream_key(&self, stream_key: &str) -> ExtractResult<Option<String>> {
        match self.config().generation {
            ApiGeneration::V4 => {
                let stream = self.stream_by_stream_key(stream_key).await?;
                Ok(stream.streamer_username().map(str::to_string))
            }
            ApiGeneration::Legacy => Ok(self.player(stream_key).await?.channel_key),
        }
    }

    /// Storage paths are either absolute URLs or relative to the storage host.
    fn storage_url(&self, path: &str) -> Result<Url, UpstreamError> {
        let url = if path.starts_with("http") {
            Url::parse(path)?
        } else {
            self.config().storage_base.join(path)?
        };
        Ok(url)
    }
}
