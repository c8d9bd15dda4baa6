//! Shared request plumbing for the API clients.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::ApiError;
use crate::traits::{Headers, HttpClient, Method, Response};

/// Headers for a JSON request, with a bearer token when given
pub(crate) fn json_headers(token: Option<&str>) -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    if let Some(token) = token {
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    }
    headers
}

/// Send a request and fail on non-2xx
pub(crate) async fn send(
    http: &dyn HttpClient,
    method: Method,
    url: &str,
    body: Option<&str>,
    headers: &Headers,
) -> Result<Response, ApiError> {
    debug!("{} {}", method, url);
    let response = http.send(method, url, body, headers).await?;
    if !response.is_success() {
        let err = ApiError::from_response(response.status, &response.body);
        debug!("{} {} failed with {}: {}", method, url, response.status, err);
        return Err(err);
    }
    Ok(response)
}

/// Send a request and decode the JSON body
pub(crate) async fn send_json<T: DeserializeOwned>(
    http: &dyn HttpClient,
    method: Method,
    url: &str,
    body: Option<&str>,
    headers: &Headers,
) -> Result<T, ApiError> {
    let response = send(http, method, url, body, headers).await?;
    Ok(response.json()?)
}
