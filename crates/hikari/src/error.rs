use thiserror::Error;

/// Failure reported back to the caller of an extractor.
///
/// `Offline` is an expected outcome rather than a fault: the channel exists,
/// it simply is not broadcasting right now.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} is offline")]
    Offline(String),

    #[error("upstream error while resolving {item}: {source}")]
    Upstream {
        item: String,
        #[source]
        source: UpstreamError,
    },

    #[error("Unsupported URL: {0}")]
    Unsupported(String),
}

impl ExtractError {
    pub fn upstream(item: impl Into<String>, source: impl Into<UpstreamError>) -> Self {
        Self::Upstream {
            item: item.into(),
            source: source.into(),
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline(_))
    }
}

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid m3u8 file: {0}")]
    M3u8ParseError(String),

    #[error("Unexpected stream status: {0}")]
    UnexpectedStatus(String),

    #[error("Missing field `{0}`")]
    MissingField(&'static str),

    #[error("No manifest template yielded any format (tried {0})")]
    ManifestsExhausted(usize),

    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
}

pub type ExtractResult<T> = Result<T, ExtractError>;
