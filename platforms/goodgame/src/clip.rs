use hikari::{ExtractError, ExtractResult, MediaInfo, UpstreamError};

use crate::GoodGameClient;

impl GoodGameClient {
    pub async fn resolve_clip(&self, clip_id: &str) -> ExtractResult<MediaInfo> {
        let clip = self.clip(clip_id).await?;

        let url = clip
            .src
            .clone()
            .ok_or_else(|| ExtractError::upstream(clip_id, UpstreamError::MissingField("src")))?;

        Ok(MediaInfo {
            id: clip_id.to_string(),
            title: clip.title.clone().unwrap_or_else(|| clip_id.to_string()),
            creator: clip.creator(),
            uploader: clip.uploader(),
            thumbnail: clip.thumbnail.clone(),
            view_count: clip.views,
            timestamp: clip.timestamp(),
            is_live: false,
            url: Some(url),
            ..Default::default()
        })
    }
}
