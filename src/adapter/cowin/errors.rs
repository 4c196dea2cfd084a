//! CoWIN Fetch Errors
//!
//! 上流サービスとの通信エラーの分類

use thiserror::Error;

/// Errors raised while talking to the CoWIN API.
///
/// Every variant is a soft failure for a single district; the aggregator logs
/// it and carries on with the remaining districts.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Classify a reqwest error, keeping timeouts distinct from other transport errors
    pub fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }

    /// HTTP status, if the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = FetchError::Status {
            url: "https://example.test/districts/1".to_string(),
            status: 403,
        };

        assert_eq!(
            error.to_string(),
            "request to https://example.test/districts/1 returned HTTP status 403"
        );
        assert_eq!(error.status(), Some(403));
        assert!(!error.is_timeout());
    }

    #[test]
    fn test_timeout_error() {
        let error = FetchError::Timeout {
            url: "https://example.test".to_string(),
        };

        assert!(error.is_timeout());
        assert_eq!(error.status(), None);
        assert!(error.to_string().contains("timed out"));
    }

    #[test]
    fn test_decode_error_keeps_source() {
        use std::error::Error as _;

        let source = serde_json::from_str::<serde_json::Value>("{ broken").unwrap_err();
        let error = FetchError::Decode {
            url: "https://example.test".to_string(),
            source,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("failed to decode response"));
    }

    #[test]
    fn test_errors_convert_into_anyhow() {
        let error: anyhow::Error = FetchError::InvalidUrl("::".to_string()).into();
        assert!(format!("{:#}", error).contains("invalid url"));
    }
}
