use once_cell::sync::Lazy;
use reqwest::IntoUrl;
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// A global instance of the reqwest Client.
pub(crate) static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Performs a GET request and deserializes the JSON response into `T`.
pub async fn fetch<T: DeserializeOwned>(url: impl IntoUrl) -> Result<T, HttpError> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    Ok(response.json::<T>().await?)
}

/// Performs a GET request and returns the response body as text.
pub async fn fetch_text(url: impl IntoUrl) -> Result<String, HttpError> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Performs a GET request and returns the raw response bytes. Used where the
/// body has to be hash-checked before it is parsed.
pub async fn fetch_bytes(url: impl IntoUrl) -> Result<Vec<u8>, HttpError> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
