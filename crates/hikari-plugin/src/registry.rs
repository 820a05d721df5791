use std::{fmt, sync::Arc};

use serde::Serialize;
use uri_match::{HostMatcher, RouterScheme, UriMatcher};

use crate::{
    Client, ExtractError, ExtractRequest, ExtractResult, ExtractorArgs, ExtractorBuilder,
    MediaInfo, ResourceHandler, ResourceKind, Url,
};

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtractorIdentifier(String);

impl ExtractorIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtractorIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type RegisteredHandler = (ExtractorIdentifier, Arc<dyn ResourceHandler>);

/// Help entry of a registered extractor.
pub struct ExtractorEntry {
    pub id: ExtractorIdentifier,
    pub help: Vec<String>,
    pub arguments: Vec<crate::ExtractorArgument>,
}

impl ExtractorEntry {
    /// Describe an extractor without building it.
    pub fn describe<B>(builder: &B) -> Self
    where
        B: ExtractorBuilder + ?Sized,
    {
        Self {
            id: ExtractorIdentifier::new(builder.name()),
            help: builder.help(),
            arguments: builder.arguments(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ExtractOutput {
    pub extractor: ExtractorIdentifier,
    pub kind: ResourceKind,
    pub info: MediaInfo,
}

/// Dispatches URLs to resource handlers by URL shape.
#[derive(Default)]
pub struct ExtractRegistry {
    matcher: UriMatcher<RegisteredHandler>,
    extractors: Vec<ExtractorEntry>,
}

impl ExtractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an extractor and let it register its routes.
    pub fn add<B>(
        &mut self,
        builder: B,
        args: &ExtractorArgs,
        client: Client,
    ) -> anyhow::Result<&mut Self>
    where
        B: ExtractorBuilder,
    {
        let entry = ExtractorEntry::describe(&builder);
        let extractor = builder.build(args, client)?;
        extractor.register(entry.id.clone(), self)?;
        log::debug!("Registered extractor {}", entry.id);

        self.extractors.push(entry);
        Ok(self)
    }

    pub fn register_http_route<H>(
        &mut self,
        scheme: RouterScheme,
        host_matcher: H,
        route: &str,
        handler: RegisteredHandler,
    ) -> anyhow::Result<()>
    where
        H: Into<HostMatcher>,
    {
        self.matcher
            .register_route(scheme, host_matcher, route, handler)?;
        Ok(())
    }

    pub fn extractors(&self) -> &[ExtractorEntry] {
        &self.extractors
    }

    /// Find the handler responsible for `url`.
    pub fn route(&self, url: &str) -> ExtractResult<(&RegisteredHandler, ExtractRequest)> {
        let parsed = Url::parse(url).map_err(|_| ExtractError::Unsupported(url.to_string()))?;
        let matched = self
            .matcher
            .try_match(&parsed)
            .ok_or_else(|| ExtractError::Unsupported(url.to_string()))?;

        Ok((
            matched.value,
            ExtractRequest {
                url: parsed,
                params: matched.params,
            },
        ))
    }

    pub async fn extract(&self, url: &str) -> ExtractResult<ExtractOutput> {
        let ((id, handler), request) = self.route(url)?;
        log::info!("[{id}] Extracting {kind} from {url}", kind = handler.kind());

        let info = handler.extract(&request).await?;
        Ok(ExtractOutput {
            extractor: id.clone(),
            kind: handler.kind(),
            info,
        })
    }
}
