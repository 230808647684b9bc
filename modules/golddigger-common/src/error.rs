use thiserror::Error;

/// Failures surfaced to the caller of a summarization.
///
/// Extraction-model failures are deliberately absent: they degrade the
/// payload and are only logged.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidInput(String),

    #[error("Video not found: {0}")]
    NotFound(String),

    #[error("Dependency failure: {0}")]
    DependencyFailure(#[source] anyhow::Error),
}

impl DigestError {
    /// Stable, caller-facing message. Never includes upstream error detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            DigestError::InvalidInput(_) => "Invalid YouTube URL",
            DigestError::NotFound(_) => "Video not found",
            DigestError::DependencyFailure(_) => "Failed to fetch data",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}
