//! Deployment environment selecting which config layer is loaded

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Environment variable holding the current environment
    pub const ENV_VAR: &'static str = "USERS_API_APP_ENV";

    /// Reads `USERS_API_APP_ENV`, falling back to `Development` when unset
    /// or unparseable.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_aliases() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("stage".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
    }

    #[test]
    fn test_environment_case_insensitive() {
        assert_eq!("PRODUCTION".parse::<Environment>().unwrap(), Environment::Production);
    }

    #[test]
    fn test_environment_unknown() {
        let err = "qa".parse::<Environment>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(name) if name == "qa"));
    }

    #[test]
    fn test_environment_display_matches_file_stem() {
        assert_eq!(Environment::Staging.to_string(), "staging");
        assert_eq!(Environment::default().as_str(), "development");
    }
}
