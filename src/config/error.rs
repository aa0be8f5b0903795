//! Errors raised while loading and validating settings

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file is missing
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Sources were read but could not be turned into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A setting holds a value outside its accepted range or format
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// `USERS_API_APP_ENV` or `--env` named an unknown environment
    #[error("Unknown environment '{0}'. Valid values are: development, test, staging, production")]
    UnknownEnvironment(String),

    /// `USERS_API_CONFIG_DIR` and `USERS_API_CONFIG_FILE` were both set
    #[error("USERS_API_CONFIG_DIR and USERS_API_CONFIG_FILE cannot both be set")]
    ConflictingSources,

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }
}
