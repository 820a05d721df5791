use matchit::InsertError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouteError>;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Invalid path pattern: {0}")]
    InvalidPathPattern(String),

    #[error("Route insert error: {0}")]
    RouteInsertError(#[from] InsertError),

    #[error("Uri parse error: {0}")]
    UriParseError(#[from] url::ParseError),
}
