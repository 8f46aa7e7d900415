use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::{
    errors::{AppError, AppResult},
    models::dto::response::MessageResponse,
};

/// Joins the API base URL and a route path.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Attaches the raw token under the configured header name.
pub fn with_token(builder: RequestBuilder, header: &str, token: &SecretString) -> RequestBuilder {
    builder.header(header, token.expose_secret())
}

/// Sends a request, mapping transport failures to `NetworkError`.
pub async fn send(builder: RequestBuilder) -> AppResult<Response> {
    builder.send().await.map_err(|e| {
        log::error!("Request to backend failed: {}", e);
        AppError::NetworkError(e.to_string())
    })
}

/// Turns a non-success response into a `ServerError` carrying its message.
pub async fn ensure_success(response: Response) -> AppResult<Response> {
    check_status(response, None).await
}

/// Like `ensure_success`, but `fallback` replaces the generic status message.
pub async fn ensure_success_or(response: Response, fallback: &str) -> AppResult<Response> {
    check_status(response, Some(fallback)).await
}

async fn check_status(response: Response, fallback: Option<&str>) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = server_error(status, &body, fallback);
    log::error!("Backend responded {}: {}", status, err);
    Err(err)
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| AppError::InternalError(format!("Unexpected response body: {}", e)))
}

/// Server-provided `message`, else `fallback`, else a generic message naming
/// the status.
pub fn server_error(status: StatusCode, body: &str, fallback: Option<&str>) -> AppError {
    let message = serde_json::from_str::<MessageResponse>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| fallback.map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    AppError::ServerError(message)
}
