//! HTTP plumbing shared by the provider adapters.

use adcraft_core::generation::GenerationError;
use reqwest::{Client, StatusCode, header::HeaderValue};
use std::time::Duration;

/// Default request timeout for every adapter.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds a client that gives up after `timeout`.
pub(crate) fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(target: "generation", "Falling back to default HTTP client: {}", err);
            Client::new()
        })
}

/// Maps a transport error from `send()` or body decoding.
pub(crate) fn map_send_error(provider: &str, err: reqwest::Error, timeout: Duration) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout(timeout)
    } else {
        GenerationError::Network(format!("{provider} API request failed: {err}"))
    }
}

/// Maps a non-success response into a [`GenerationError::Http`].
pub(crate) fn map_http_error(
    status: StatusCode,
    message: String,
    retry_after: Option<Duration>,
) -> GenerationError {
    let retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    GenerationError::Http {
        status: status.as_u16(),
        message,
        retryable,
        retry_after,
    }
}

pub(crate) fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are ignored
    value.parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(matches!(
            map_http_error(StatusCode::TOO_MANY_REQUESTS, "busy".into(), None),
            GenerationError::Http { retryable: true, .. }
        ));
        assert!(matches!(
            map_http_error(StatusCode::BAD_REQUEST, "bad".into(), None),
            GenerationError::Http { retryable: false, status: 400, .. }
        ));
    }

    #[test]
    fn test_parse_retry_after() {
        let seconds = HeaderValue::from_static("12");
        assert_eq!(parse_retry_after(Some(&seconds)), Some(Duration::from_secs(12)));
        let date = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&date)), None);
        assert_eq!(parse_retry_after(None), None);
    }
}
