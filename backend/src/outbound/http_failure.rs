//! Transport failure classification shared by the reqwest adapters.
//!
//! Each adapter converts [`HttpFailure`] into its own port error, so the
//! status mapping rules live in one place.

use std::time::Duration;

use reqwest::{Client, StatusCode};

const USER_AGENT: &str = concat!("command-center/", env!("CARGO_PKG_VERSION"));
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Classified outbound HTTP failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HttpFailure {
    Transport(String),
    Timeout(String),
    RateLimited(String),
    Rejected { status: u16, message: String },
}

impl HttpFailure {
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }

    pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let preview = body_preview(body);
        let message = if preview.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {preview}", status.as_u16())
        };
        match status {
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::Timeout(message),
            _ if status.is_client_error() => Self::Rejected {
                status: status.as_u16(),
                message,
            },
            _ => Self::Transport(message),
        }
    }
}

/// Build a client with the shared user agent and optional timeout.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let builder = Client::builder().user_agent(USER_AGENT);
    match timeout {
        Some(timeout) => builder.timeout(timeout).build(),
        None => builder.build(),
    }
}

/// Send a request and return the body of a successful response.
pub(crate) async fn send_for_body(request: reqwest::RequestBuilder) -> Result<Vec<u8>, HttpFailure> {
    let response = request.send().await.map_err(HttpFailure::from_transport)?;
    let status = response.status();
    let body = response.bytes().await.map_err(HttpFailure::from_transport)?;
    if !status.is_success() {
        return Err(HttpFailure::from_status(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

/// Whitespace-collapsed prefix of a response body for error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Implement `From<HttpFailure>` for a port error with matching variants.
macro_rules! impl_from_http_failure {
    ($error:ty) => {
        impl From<$crate::outbound::http_failure::HttpFailure> for $error {
            fn from(failure: $crate::outbound::http_failure::HttpFailure) -> Self {
                use $crate::outbound::http_failure::HttpFailure;
                match failure {
                    HttpFailure::Transport(message) => Self::transport(message),
                    HttpFailure::Timeout(message) => Self::timeout(message),
                    HttpFailure::RateLimited(message) => Self::rate_limited(message),
                    HttpFailure::Rejected { status, message } => Self::rejected(status, message),
                }
            }
        }
    };
}

pub(crate) use impl_from_http_failure;
