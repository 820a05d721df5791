use std::{str::FromStr, time::Duration};

use fake_user_agent::get_chrome_rua;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    BuildError(#[from] reqwest::Error),
}

/// Options used to build the HTTP client shared by extractors.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Additional headers, in `Name: value` form
    pub headers: Vec<String>,

    pub timeout: Duration,

    /// Falls back to a random Chrome user agent
    pub user_agent: Option<String>,
}

impl HttpOptions {
    pub fn into_client(self) -> Result<Client, ClientError> {
        let mut headers = HeaderMap::new();

        for header in &self.headers {
            let (key, value) = header
                .split_once(':')
                .ok_or_else(|| ClientError::InvalidHeader(header.clone()))?;
            headers.insert(
                HeaderName::from_str(key.trim())
                    .map_err(|_| ClientError::InvalidHeader(header.clone()))?,
                HeaderValue::from_str(value.trim())
                    .map_err(|_| ClientError::InvalidHeader(header.clone()))?,
            );
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| get_chrome_rua().to_string());

        Ok(Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(self.timeout)
            .build()?)
    }
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            timeout: Duration::from_secs(10),
            user_agent: None,
        }
    }
}
