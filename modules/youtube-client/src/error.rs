use thiserror::Error;

pub type Result<T> = std::result::Result<T, YouTubeError>;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl YouTubeError {
    /// Whether a retry has a reasonable chance of succeeding.
    /// Quota and auth failures come back as 403 and are not transient.
    pub fn is_transient(&self) -> bool {
        match self {
            YouTubeError::Network(_) => true,
            YouTubeError::Api { status, .. } => *status == 429 || *status >= 500,
            YouTubeError::Parse(_) => false,
        }
    }
}

impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        YouTubeError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for YouTubeError {
    fn from(err: serde_json::Error) -> Self {
        YouTubeError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_transient() {
        assert!(YouTubeError::Network("connection reset".into()).is_transient());
    }

    #[test]
    fn server_errors_and_rate_limits_are_transient() {
        for status in [429, 500, 503] {
            let err = YouTubeError::Api {
                status,
                message: String::new(),
            };
            assert!(err.is_transient(), "status {status} should be transient");
        }
    }

    #[test]
    fn client_errors_are_not_transient() {
        for status in [400, 403, 404] {
            let err = YouTubeError::Api {
                status,
                message: String::new(),
            };
            assert!(!err.is_transient(), "status {status} should not be transient");
        }
        assert!(!YouTubeError::Parse("eof".into()).is_transient());
    }
}
