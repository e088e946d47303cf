//! Generic JSON call to the backend.

use gloo::net::http::Request;
use serde_json::Value;

use crate::error::{GalaxyError, GalaxyResult};
use crate::notify::Notifier;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// `GET endpoint` without a body, `POST endpoint` with one.
pub async fn request_json(endpoint: &str, body: Option<&Value>) -> GalaxyResult<Value> {
    let response = match body {
        None => Request::get(endpoint)
            .header("Content-Type", "application/json")
            .send()
            .await,
        Some(body) => Request::post(endpoint)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(body)?)
            .map_err(|e| GalaxyError::network(e.to_string()))?
            .send()
            .await,
    }
    .map_err(|e| GalaxyError::network(e.to_string()))?;

    let text = response
        .text()
        .await
        .map_err(|e| GalaxyError::network(e.to_string()))?;
    Ok(serde_json::from_str(&text)?)
}

/// [`request_json`] that toasts instead of failing.
pub async fn api_call<N: Notifier>(
    endpoint: &str,
    body: Option<&Value>,
    notifier: &mut N,
) -> Option<Value> {
    match request_json(endpoint, body).await {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("API call to {endpoint} failed: {e}");
            notifier.error(NETWORK_ERROR_MESSAGE);
            None
        }
    }
}
