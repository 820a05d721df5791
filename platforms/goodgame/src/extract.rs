use std::sync::Arc;

use hikari_plugin::*;

use crate::{
    config::GoodGameConfig,
    constants::*,
    model::ChannelRef,
    GoodGameClient,
};

pub struct GoodGameExtractor;

impl ExtractorBuilder for GoodGameExtractor {
    fn name(&self) -> String {
        "goodgame".to_string()
    }

    fn help(&self) -> Vec<String> {
        [
            "Extracts GoodGame live streams, vods and clips from the given URL.",
            "",
            "Template:",
            "- https://goodgame.ru/{username}",
            "- https://goodgame.ru/player?{stream_key}",
            "- https://goodgame.ru/vods/{stream_key}/{timestamp}",
            "- https://goodgame.ru/clip/{id}",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn arguments(&self) -> Vec<ExtractorArgument> {
        vec![
            ExtractorArgument {
                name: ARG_API_GENERATION,
                env: Some(ENV_API_GENERATION),
                help: "[GoodGame] API generation used for channel lookups: v4 or legacy.",
            },
            ExtractorArgument {
                name: ARG_MANIFEST_TEMPLATE,
                env: Some(ENV_MANIFEST_TEMPLATE),
                help: "[GoodGame] Comma separated live manifest templates containing {stream_key}, newest first.",
            },
            ExtractorArgument {
                name: ARG_API_BASE,
                env: Some(ENV_API_BASE),
                help: "[GoodGame] Base URL of API v4.",
            },
            ExtractorArgument {
                name: ARG_LEGACY_API_BASE,
                env: Some(ENV_LEGACY_API_BASE),
                help: "[GoodGame] Base URL of the legacy API.",
            },
            ExtractorArgument {
                name: ARG_STORAGE_BASE,
                env: Some(ENV_STORAGE_BASE),
                help: "[GoodGame] Base URL of the vod storage.",
            },
        ]
    }

    fn build(&self, args: &ExtractorArgs, client: Client) -> anyhow::Result<Box<dyn Extractor>> {
        let config = GoodGameConfig::from_args(args)?;
        log::debug!("GoodGame API generation: {}", config.generation);
        Ok(Box::new(GoodGameExtractorImpl(GoodGameClient::new(
            client, config,
        ))))
    }
}

struct GoodGameExtractorImpl(GoodGameClient);

impl Extractor for GoodGameExtractorImpl {
    fn register(&self, id: ExtractorIdentifier, registry: &mut ExtractRegistry) -> anyhow::Result<()> {
        let stream: Arc<dyn ResourceHandler> = Arc::new(StreamHandler(self.0.clone()));
        for route in ["/{username}", "/{username}/", "/player"] {
            registry.register_http_route(
                RouterScheme::Both,
                HOSTS,
                route,
                (id.clone(), stream.clone()),
            )?;
        }

        registry.register_http_route(
            RouterScheme::Both,
            HOSTS,
            "/vods/{stream_key}/{timestamp}",
            (id.clone(), Arc::new(VodHandler(self.0.clone()))),
        )?;

        registry.register_http_route(
            RouterScheme::Both,
            HOSTS,
            "/clip/{id}",
            (id, Arc::new(ClipHandler(self.0.clone()))),
        )?;

        Ok(())
    }
}

struct StreamHandler(GoodGameClient);

impl StreamHandler {
    fn channel_ref(request: &ExtractRequest) -> ExtractResult<ChannelRef> {
        if let Some(username) = request.params.path("username") {
            // channel pages take no query string
            if request.params.raw_query.is_some() {
                return Err(ExtractError::Unsupported(request.url.to_string()));
            }
            return Ok(ChannelRef::Username(username.to_string()));
        }

        // goodgame.ru/player?{stream_key}
        request
            .params
            .raw_query
            .as_deref()
            .and_then(|q| q.split('&').next())
            .filter(|key| !key.is_empty() && !key.contains('='))
            .map(|key| ChannelRef::PlayerToken(key.to_string()))
            .ok_or_else(|| ExtractError::Unsupported(request.url.to_string()))
    }
}

#[async_trait]
impl ResourceHandler for StreamHandler {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Stream
    }

    async fn extract(&self, request: &ExtractRequest) -> ExtractResult<MediaInfo> {
        let reference = Self::channel_ref(request)?;
        self.0.resolve(&reference).await
    }
}

struct VodHandler(GoodGameClient);

#[async_trait]
impl ResourceHandler for VodHandler {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Vod
    }

    async fn extract(&self, request: &ExtractRequest) -> ExtractResult<MediaInfo> {
        let stream_key = request.path("stream_key")?;
        let timestamp = request.path("timestamp")?;
        if !is_vod_timestamp(timestamp) {
            return Err(ExtractError::Unsupported(request.url.to_string()));
        }

        self.0.resolve_vod(stream_key, timestamp).await
    }
}

struct ClipHandler(GoodGameClient);

#[async_trait]
impl ResourceHandler for ClipHandler {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Clip
    }

    async fn extract(&self, request: &ExtractRequest) -> ExtractResult<MediaInfo> {
        let clip_id = request.path("id")?;
        if clip_id.is_empty() || !clip_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ExtractError::Unsupported(request.url.to_string()));
        }

        self.0.resolve_clip(clip_id).await
    }
}

fn is_vod_timestamp(timestamp: &str) -> bool {
    !timestamp.is_empty()
        && timestamp
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'T' | b'Z' | b':' | b'+' | b'-'))
}
