use log::{debug, error};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

use crate::error::ApiError;

const APP_USER_AGENT: &str = concat!("mcstat/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client(timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(ApiError::Client)
}

/// Sends one request and decodes the JSON reply.
///
/// Any status of 400 or above is an error. An empty body (204 from the
/// auth endpoints) gives `Ok(None)`.
pub async fn send_json(
    client: &Client,
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Option<&Value>,
) -> Result<Option<Value>, ApiError> {
    let request_err = |source| ApiError::Request {
        url: url.to_string(),
        source,
    };

    debug!("{} {}", method, url);
    let mut request = client.request(method, url).headers(headers);
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request.send().await.map_err(request_err)?;
    let status = response.status();
    if status.as_u16() >= 400 {
        error!("Unsuccessful request to {}: {}", url, status);
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(request_err)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
}
