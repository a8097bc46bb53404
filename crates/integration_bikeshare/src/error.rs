//! Station feed error types

use thiserror::Error;

/// Errors that can occur while reading the station feed
#[derive(Debug, Error)]
pub enum StationFeedError {
    /// Connection to the feed failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the feed failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the feed response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Query parameters rejected before sending
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl StationFeedError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(StationFeedError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(StationFeedError::RequestFailed("test".to_string()).is_retryable());
        assert!(StationFeedError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(
            StationFeedError::RateLimitExceeded {
                retry_after_secs: Some(60)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!StationFeedError::ParseError("test".to_string()).is_retryable());
        assert!(!StationFeedError::InvalidQuery("test".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = StationFeedError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = StationFeedError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
