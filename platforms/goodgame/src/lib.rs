pub mod clip;
pub mod config;
pub mod constants;
pub mod extract;
pub mod model;
pub mod stream;
pub mod vod;

use std::sync::Arc;

use hikari::{fetch::fetch_json, Client, ExtractError, ExtractResult, UpstreamError, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use config::GoodGameConfig;
use model::*;

#[derive(Clone)]
pub struct GoodGameClient {
    client: Client,
    config: Arc<GoodGameConfig>,
}

impl GoodGameClient {
    pub fn new(client: Client, config: GoodGameConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &GoodGameConfig {
        &self.config
    }

    /// Fetch a GoodGame API resource.
    ///
    /// Endpoints that are not absolute URLs are relative to the v4 API base.
    async fn fetch<T>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        description: &str,
        item_id: &str,
    ) -> ExtractResult<T>
    where
        T: DeserializeOwned,
    {
        let url = if endpoint.starts_with("http") {
            Url::parse(endpoint)
        } else {
            self.config.api_base.join(endpoint)
        }
        .map_err(|e| ExtractError::upstream(item_id, e))?;

        fetch_json(&self.client, url, query, description, item_id).await
    }

    pub async fn stream_by_username(&self, username: &str) -> ExtractResult<StreamV4> {
        self.fetch(
            &format!("streams/2/username/{username}"),
            &[],
            "stream",
            username,
        )
        .await
    }

    pub async fn stream_by_id(&self, stream_id: &str) -> ExtractResult<StreamV4> {
        self.fetch(&format!("streams/2/id/{stream_id}"), &[], "stream", stream_id)
            .await
    }

    pub async fn player(&self, stream_key: &str) -> ExtractResult<PlayerInfo> {
        let url = self.legacy_url("player", stream_key)?;
        self.fetch(url.as_str(), &[("src", stream_key)], "player", stream_key)
            .await
    }

    /// There is no API v4 method to fetch a stream by its key, so the
    /// legacy player endpoint provides the stream id first.
    pub async fn stream_by_stream_key(&self, stream_key: &str) -> ExtractResult<StreamV4> {
        let player = self.player(stream_key).await?;
        let stream_id = player
            .channel_id
            .ok_or_else(|| ExtractError::NotFound(stream_key.to_string()))?;
        self.stream_by_id(&stream_id.to_string()).await
    }

    pub async fn legacy_channel(&self, channel: &str) -> ExtractResult<LegacyChannel> {
        let url = self.legacy_url("getchannelstatus", channel)?;
        let status: Value = self
            .fetch(
                url.as_str(),
                &[("id", channel), ("fmt", "json")],
                "channel status",
                channel,
            )
            .await?;

        legacy_channel_from_status(status)
            .map_err(|e| ExtractError::upstream(channel, e))?
            .ok_or_else(|| ExtractError::NotFound(channel.to_string()))
    }

    pub async fn vods(&self, stream_key: &str) -> ExtractResult<VodList> {
        let url = self
            .config
            .storage_base
            .join("api/json/channel/video")
            .map_err(|e| ExtractError::upstream(stream_key, e))?;
        self.fetch(url.as_str(), &[("streamId", stream_key)], "vods", stream_key)
            .await
    }

    pub async fn clip(&self, clip_id: &str) -> ExtractResult<Clip> {
        self.fetch(&format!("clips/2/{clip_id}"), &[], "clip", clip_id)
            .await
    }

    fn legacy_url(&self, endpoint: &str, item_id: &str) -> ExtractResult<Url> {
        self.config
            .legacy_api_base
            .join(endpoint)
            .map_err(|e| ExtractError::upstream(item_id, UpstreamError::from(e)))
    }
}

impl Default for GoodGameClient {
    fn default() -> Self {
        Self::new(Client::new(), GoodGameConfig::default())
    }
}
