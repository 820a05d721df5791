use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::{ExtractError, ExtractResult, UpstreamError};

/// Fetch a JSON resource.
///
/// `description` and `item_id` only serve logging and error context. A 404
/// response means the item does not exist upstream and is reported as
/// [`ExtractError::NotFound`].
pub async fn fetch_json<T>(
    client: &Client,
    url: Url,
    query: &[(&str, &str)],
    description: &str,
    item_id: &str,
) -> ExtractResult<T>
where
    T: DeserializeOwned,
{
    log::debug!("[{item_id}] Downloading {description} data: {url}");

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| ExtractError::upstream(item_id, e))?;

    match response.status() {
        StatusCode::NOT_FOUND => return Err(ExtractError::NotFound(item_id.to_string())),
        status if !status.is_success() => {
            log::warn!("[{item_id}] Unable to download {description} data: {status}");
            return Err(ExtractError::upstream(
                item_id,
                UpstreamError::HttpStatus(status),
            ));
        }
        _ => {}
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| ExtractError::upstream(item_id, e))?;
    serde_json::from_slice(&body).map_err(|e| ExtractError::upstream(item_id, e))
}

/// Fetch a text resource, treating every non-2xx status as a failure.
pub async fn fetch_text(client: &Client, url: Url) -> Result<String, UpstreamError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::HttpStatus(status));
    }

    Ok(response.text().await?)
}
