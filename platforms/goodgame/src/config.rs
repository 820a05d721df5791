use std::{fmt, str::FromStr};

use anyhow::{bail, Context};
use hikari::Url;
use hikari_plugin::ExtractorArgs;

use crate::constants::*;

/// Generation of the GoodGame API used for channel lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiGeneration {
    /// `api/4`: boolean `online`, `streamKey`.
    #[default]
    V4,
    /// `api/getchannelstatus`: `status` of `Live`/`Dead`, stream key inside `embed`.
    Legacy,
}

impl FromStr for ApiGeneration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v4" | "4" => Ok(Self::V4),
            "legacy" | "v1" | "1" => Ok(Self::Legacy),
            _ => bail!("Unknown GoodGame API generation: {s}"),
        }
    }
}

impl fmt::Display for ApiGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiGeneration::V4 => f.write_str("v4"),
            ApiGeneration::Legacy => f.write_str("legacy"),
        }
    }
}

/// Live manifest URL with a `{stream_key}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestTemplate(String);

impl ManifestTemplate {
    const PLACEHOLDER: &'static str = "{stream_key}";

    pub fn new(template: impl Into<String>) -> anyhow::Result<Self> {
        let template = template.into();
        if !template.contains(Self::PLACEHOLDER) {
            bail!("Manifest template `{template}` has no {{stream_key}} placeholder");
        }
        Ok(Self(template))
    }

    pub fn render(&self, stream_key: &str) -> String {
        self.0.replace(Self::PLACEHOLDER, stream_key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct GoodGameConfig {
    pub api_base: Url,
    pub legacy_api_base: Url,
    pub storage_base: Url,
    pub generation: ApiGeneration,
    /// Tried in order until one yields formats
    pub manifest_templates: Vec<ManifestTemplate>,
}

impl GoodGameConfig {
    pub fn from_args(args: &ExtractorArgs) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(base) = args.get_or_env(ARG_API_BASE, ENV_API_BASE) {
            config.api_base = parse_base(&base)?;
        }
        if let Some(base) = args.get_or_env(ARG_LEGACY_API_BASE, ENV_LEGACY_API_BASE) {
            config.legacy_api_base = parse_base(&base)?;
        }
        if let Some(base) = args.get_or_env(ARG_STORAGE_BASE, ENV_STORAGE_BASE) {
            config.storage_base = parse_base(&base)?;
        }
        if let Some(generation) = args.get_or_env(ARG_API_GENERATION, ENV_API_GENERATION) {
            config.generation = generation.parse()?;
        }
        if let Some(templates) = args.get_or_env(ARG_MANIFEST_TEMPLATE, ENV_MANIFEST_TEMPLATE) {
            config.manifest_templates = templates
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ManifestTemplate::new)
                .collect::<anyhow::Result<_>>()?;
            if config.manifest_templates.is_empty() {
                bail!("At least one manifest template is required");
            }
        }

        Ok(config)
    }

    pub fn with_generation(mut self, generation: ApiGeneration) -> Self {
        self.generation = generation;
        self
    }
}

impl Default for GoodGameConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(API_V4_BASE_URL).expect("valid default api base"),
            legacy_api_base: Url::parse(LEGACY_API_BASE_URL).expect("valid default legacy base"),
            storage_base: Url::parse(STORAGE_BASE_URL).expect("valid default storage base"),
            generation: ApiGeneration::default(),
            manifest_templates: MANIFEST_TEMPLATES
                .iter()
                .map(|t| ManifestTemplate(t.to_string()))
                .collect(),
        }
    }
}

/// Base URLs are joined with relative endpoints, so they must end with `/`.
fn parse_base(base: &str) -> anyhow::Result<Url> {
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    Url::parse(&base).with_context(|| format!("Invalid base URL: {base}"))
}
