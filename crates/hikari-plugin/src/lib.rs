mod registry;

pub use async_trait::async_trait;
pub use hikari::{Client, ExtractError, ExtractResult, Format, MediaInfo, Thumbnail, Url};
pub use registry::*;
pub use uri_match::{HostMatcher, RouterScheme, UriParams};

use serde::Serialize;
use std::{collections::HashMap, fmt};

/// Key-value arguments handed to extractor builders.
#[derive(Default)]
pub struct ExtractorArgs {
    inner: HashMap<String, String>,
}

impl ExtractorArgs {
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.to_string())
    }

    pub fn env(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    /// Look up `key`, then fall back to the `env` environment variable.
    pub fn get_or_env(&self, key: &str, env: &str) -> Option<String> {
        self.get(key).or_else(|| self.env(env))
    }

    pub fn from_key_value(input: &[String]) -> anyhow::Result<Self> {
        let inner = input
            .iter()
            .map(|s| -> anyhow::Result<(String, String)> {
                let (key, value) = s
                    .split_once('=')
                    .ok_or_else(|| anyhow::anyhow!("Invalid argument `{s}`, expected key=value"))?;
                Ok((key.to_string(), value.to_string()))
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(Self { inner })
    }
}

/// Argument accepted by an extractor, shown in help output.
#[derive(Debug, Clone)]
pub struct ExtractorArgument {
    pub name: &'static str,
    pub env: Option<&'static str>,
    pub help: &'static str,
}

pub trait ExtractorBuilder {
    fn name(&self) -> String;

    fn help(&self) -> Vec<String> {
        vec!["No help available".to_string()]
    }

    fn arguments(&self) -> Vec<ExtractorArgument> {
        Vec::new()
    }

    fn build(&self, args: &ExtractorArgs, client: Client) -> anyhow::Result<Box<dyn Extractor>>;
}

pub trait Extractor: Send + Sync {
    /// Register one route per URL shape this extractor understands.
    fn register(&self, id: ExtractorIdentifier, registry: &mut ExtractRegistry)
        -> anyhow::Result<()>;
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Stream,
    Vod,
    Clip,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Stream => "stream",
            ResourceKind::Vod => "vod",
            ResourceKind::Clip => "clip",
        };
        f.write_str(name)
    }
}

/// Request routed to a [`ResourceHandler`].
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub url: Url,
    pub params: UriParams,
}

impl ExtractRequest {
    /// Path parameter declared by the route. Missing parameters mean the
    /// handler was registered on a route that does not declare them.
    pub fn path(&self, key: &str) -> ExtractResult<&str> {
        self.params
            .path(key)
            .ok_or_else(|| ExtractError::Unsupported(self.url.to_string()))
    }
}

#[async_trait]
pub trait ResourceHandler: Send + Sync {
    fn kind(&self) -> ResourceKind;

    async fn extract(&self, request: &ExtractRequest) -> ExtractResult<MediaInfo>;
}
