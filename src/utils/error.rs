use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefixError {
    #[error("Cannot read file '{}': {source}", .path.display())]
    FileAccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected document shape in '{}': {message}", .path.display())]
    UnexpectedShape { path: PathBuf, message: String },

    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    ApiError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl PrefixError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PrefixError::FileAccessError { path, .. } => {
                format!("Cannot open '{}'", path.display())
            }
            PrefixError::ParseError { path, source } => {
                format!("'{}' is not valid JSON ({})", path.display(), source)
            }
            PrefixError::UnexpectedShape { path, message } => {
                format!("'{}' does not look like a prefix listing: {}", path.display(), message)
            }
            PrefixError::RequestError(_) | PrefixError::ApiError { .. } => {
                format!("DataCite request failed: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PrefixError::FileAccessError { .. } | PrefixError::IoError(_) => {
                "Check that the path exists and is readable"
            }
            PrefixError::ParseError { .. } | PrefixError::UnexpectedShape { .. } => {
                "Re-download the page from the DataCite /prefixes endpoint"
            }
            PrefixError::RequestError(_) | PrefixError::ApiError { .. } => {
                "Check the endpoint URL and your network connection, then run again"
            }
            PrefixError::ConfigValidationError { .. }
            | PrefixError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PrefixError>;
