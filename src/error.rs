//! Custom error types for labelsaurus with improved type safety and error handling.

use thiserror::Error;

/// Main error type for labelsaurus operations.
#[derive(Error, Debug)]
pub enum LabelsaurusError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Configuration path is missing")]
    MissingConfigPath,

    // Event payload errors
    #[error("Not a pull request event: {0}")]
    NotPullRequest(String),

    // Configuration errors
    #[error("Failed to load configuration from {path}: {reason}")]
    ConfigFetch { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("YAML parse error: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    // Rule pattern errors
    #[error("Invalid pattern for label '{label}': {source}")]
    InvalidPattern {
        label: String,
        source: regex::Error,
    },

    // Forge/API errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    // JSON parsing errors
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using LabelsaurusError
pub type Result<T> = std::result::Result<T, LabelsaurusError>;

impl LabelsaurusError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a config fetch error for a given repository path
    pub fn config_fetch(
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ConfigFetch {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for LabelsaurusError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for LabelsaurusError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            octocrab::Error::GitHub { source, .. }
                if source.status_code.as_u16() == 401
                    || source.status_code.as_u16() == 403 =>
            {
                Self::AuthenticationError(err.to_string())
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
