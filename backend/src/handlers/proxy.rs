use anyhow::Context;
use axum::{
    body::{Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use leavedesk_access::cookie::{extract_cookie_value, ACCESS_COOKIE_NAME};
use serde_json::json;
use url::Url;

use crate::{error::AppError, state::AppState};

/// Forwards `/api/{*rest}` to the leave API, attaching the caller's bearer
/// token. Status and JSON body of the upstream answer are passed back as-is.
pub async fn forward(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let url = upstream_url(&state.config.backend_api_url, &rest, query.as_deref())?;

    let mut upstream = state.http.request(method.clone(), url.clone());
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        upstream = upstream.header(header::CONTENT_TYPE, content_type.clone());
    }
    if let Some(token) = bearer_token(&headers) {
        upstream = upstream.bearer_auth(token);
    }
    if !body.is_empty() {
        upstream = upstream.body(body);
    }

    let response = upstream.send().await.map_err(|err| {
        AppError::BadGateway(format!("{} {} failed: {}", method, url.path(), err))
    })?;

    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = response.bytes().await?;

    if !status.is_success() && serde_json::from_slice::<serde_json::Value>(&bytes).is_err() {
        tracing::warn!(
            status = status.as_u16(),
            method = %method,
            path = %url.path(),
            "Upstream error without JSON body"
        );
        return Ok((status, Json(json!({ "message": "Invalid response from server" }))).into_response());
    }

    Ok(passthrough(status, content_type, bytes)?)
}

fn passthrough(
    status: StatusCode,
    content_type: Option<HeaderValue>,
    bytes: Bytes,
) -> anyhow::Result<Response> {
    let content_type =
        content_type.unwrap_or_else(|| HeaderValue::from_static("application/json"));
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .context("Failed to build proxied response")
}

/// Appends `rest` to the base path one segment at a time so nothing in the
/// caller's path can climb above the configured base.
pub fn upstream_url(base: &Url, rest: &str, query: Option<&str>) -> Result<Url, AppError> {
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    if segments.iter().any(|segment| is_unsafe_segment(segment)) {
        return Err(AppError::BadRequest("Invalid API path".to_string()));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::BadRequest("Backend URL cannot carry a path".to_string()))?
        .pop_if_empty()
        .extend(segments);
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

fn is_unsafe_segment(segment: &str) -> bool {
    if segment.contains('\\') {
        return true;
    }
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Explicit `Authorization: Bearer` wins; otherwise the access cookie.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .map(str::to_string);

    from_header.or_else(|| {
        headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| extract_cookie_value(raw, ACCESS_COOKIE_NAME))
    })
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(rest.trim()).filter(|token| !token.is_empty())
    } else {
        None
    }
}
