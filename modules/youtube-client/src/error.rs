use thiserror::Error;

pub type Result<T> = std::result::Result<T, YouTubeError>;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}, reason {reason}): {message}")]
    Api {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

// The API key travels in the query string; strip the URL so it never reaches logs.
impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        YouTubeError::Network(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for YouTubeError {
    fn from(err: serde_json::Error) -> Self {
        YouTubeError::Parse(err.to_string())
    }
}
