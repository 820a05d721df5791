use hikari::{
    hls::extract_m3u8_formats, ExtractError, ExtractResult, Format, MediaInfo, UpstreamError, Url,
};

use crate::{
    config::ApiGeneration,
    model::{ChannelRef, ChannelStream, StreamStatus},
    GoodGameClient,
};

impl GoodGameClient {
    /// Resolve a live channel into its playable formats.
    ///
    /// Fails with [`ExtractError::Offline`] before touching any manifest when
    /// the channel is not broadcasting.
    pub async fn resolve(&self, reference: &ChannelRef) -> ExtractResult<MediaInfo> {
        let channel = self.channel(reference).await?;
        let video_id = channel
            .username
            .clone()
            .unwrap_or_else(|| reference.to_string());

        match &channel.status {
            StreamStatus::Online => {}
            StreamStatus::Offline => return Err(ExtractError::Offline(video_id)),
            StreamStatus::Unknown(status) => {
                return Err(ExtractError::upstream(
                    video_id,
                    UpstreamError::UnexpectedStatus(status.clone()),
                ))
            }
        }

        let stream_key = match reference {
            ChannelRef::PlayerToken(token) => token.clone(),
            ChannelRef::Username(_) => channel.stream_key.clone().ok_or_else(|| {
                ExtractError::upstream(&video_id, UpstreamError::MissingField("streamKey"))
            })?,
        };
        let formats = self.live_formats(&stream_key, &video_id).await?;

        Ok(MediaInfo {
            // untitled streams are still playable
            title: channel.title.unwrap_or_else(|| video_id.clone()),
            creator: channel.username,
            thumbnail: channel.thumbnail,
            is_live: true,
            formats,
            id: video_id,
            ..Default::default()
        })
    }

    /// Look the channel up with the configured API generation.
    pub async fn channel(&self, reference: &ChannelRef) -> ExtractResult<ChannelStream> {
        match (self.config().generation, reference) {
            (ApiGeneration::V4, ChannelRef::Username(username)) => {
                let stream = self.stream_by_username(username).await?;
                Ok(stream.into_channel(Some(username.clone())))
            }
            (ApiGeneration::V4, ChannelRef::PlayerToken(token)) => {
                let stream = self.stream_by_stream_key(token).await?;
                Ok(stream.into_channel(None))
            }
            (ApiGeneration::Legacy, ChannelRef::Username(username)) => {
                let channel = self.legacy_channel(username).await?;
                Ok(channel.into_channel(Some(username.clone())))
            }
            (ApiGeneration::Legacy, ChannelRef::PlayerToken(token)) => {
                let player = self.player(token).await?;
                let channel_key = player
                    .channel_key
                    .or_else(|| player.channel_id.map(|id| id.to_string()))
                    .ok_or_else(|| ExtractError::NotFound(token.clone()))?;
                let channel = self.legacy_channel(&channel_key).await?;
                Ok(channel.into_channel(None))
            }
        }
    }

    /// Probe manifest templates in priority order and keep the first one
    /// that offers any format.
    pub async fn live_formats(&self, stream_key: &str, video_id: &str) -> ExtractResult<Vec<Format>> {
        let templates = &self.config().manifest_templates;

        for template in templates {
            let manifest_url = match Url::parse(&template.render(stream_key)) {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("[{video_id}] Invalid manifest URL from {}: {e}", template.as_str());
                    continue;
                }
            };

            match extract_m3u8_formats(&self.client, manifest_url.clone()).await {
                Ok(formats) if !formats.is_empty() => {
                    log::info!(
                        "[{video_id}] Found {} formats in {manifest_url}",
                        formats.len()
                    );
                    return Ok(formats);
                }
                Ok(_) => log::warn!("[{video_id}] No formats in {manifest_url}"),
                Err(e) => log::warn!("[{video_id}] Unable to probe {manifest_url}: {e}"),
            }
        }

        Err(ExtractError::upstream(
            video_id,
            UpstreamError::ManifestsExhausted(templates.len()),
        ))
    }
}
