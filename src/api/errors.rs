use thiserror::Error;

/// Failure of a single service call.
///
/// `Network` covers everything below HTTP (DNS, refused connections, broken
/// transfers); `Service` is a completed request that came back non-2xx,
/// carrying the service's `detail` string when the error body had one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to the classification service failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("service responded with HTTP {status}")]
    Service { status: u16, detail: Option<String> },
}

impl ApiError {
    /// Message to show the user: the service-provided `detail` when present,
    /// otherwise the given operation-specific fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Service {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status of a service-level failure, if this was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } => Some(*status),
            ApiError::Network(_) => None,
        }
    }
}
