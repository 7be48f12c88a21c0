//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the request or response body is longer than [LOG_BODY_LENGTH_LIMIT]
/// bytes, it is truncated and the full body is logged at the `debug` level.
///
/// Request bodies over [MAX_REQUEST_BODY_BYTES] are rejected with
/// [Error::PayloadTooLarge] before reaching the route handler.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body) = request.into_parts();
    let body_text = match read_body_text(body, MAX_REQUEST_BODY_BYTES).await {
        Ok(body_text) => body_text,
        Err(error) => {
            tracing::warn!(
                "Could not read request body for {} {}: {error}",
                headers.method,
                headers.uri
            );
            return Error::PayloadTooLarge.into_response();
        }
    };
    log_request(&headers, &body_text);

    let request = Request::from_parts(headers, Body::from(body_text));
    let response = next.run(request).await;

    let (headers, body_text) = split_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, Body::from(body_text))
}

async fn split_response(response: Response) -> (response::Parts, String) {
    let (headers, body) = response.into_parts();

    match read_body_text(body, usize::MAX).await {
        Ok(body_text) => (headers, body_text),
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            (headers, String::new())
        }
    }
}

async fn read_body_text(body: Body, limit: usize) -> Result<String, axum::Error> {
    let bytes = axum::body::to_bytes(body, limit).await?;

    Ok(String::from_utf8_lossy(&bytes).to_string())
}

/// The largest request body, in bytes, the server will read.
///
/// Matches the default limit of axum's body extractors.
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// The maximum number of bytes of a body to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Cut `body` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
fn truncate(body: &str) -> Option<&str> {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    Some(&body[..end])
}

fn log_request(headers: &request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!(
                "Received request: {} {}\nbody: {truncated}...",
                headers.method,
                headers.uri
            );
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            headers.method,
            headers.uri
        ),
    }
}

fn log_response(headers: &response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {}\nbody: {truncated}...", headers.status);
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {}\nbody: {body:?}", headers.status),
    }
}
