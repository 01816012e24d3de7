use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable selecting the deployment stage of the trigger.
const APP_ENVIRONMENT_ENV_NAME: &str = "APP_ENVIRONMENT";

const PROD_ENV_NAME: &str = "prod";
const STAGING_ENV_NAME: &str = "staging";
const DEV_ENV_NAME: &str = "dev";

/// `APP_ENVIRONMENT` holds a value that is not a known deployment stage.
#[derive(Debug, Error)]
#[error("`{0}` is not a supported environment, use `prod`, `staging` or `dev`")]
pub struct UnknownEnvironmentError(String);

/// Deployment stage of the trigger.
///
/// Loaded once at startup and handed to everything that depends on it: the configuration loader
/// picks `configuration/{environment}.yaml`, tracing picks JSON or console output and Sentry tags
/// every report with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Prod,
    Staging,
    Dev,
}

impl Environment {
    /// Reads the stage from `APP_ENVIRONMENT`, defaulting to [`Environment::Prod`] when unset.
    pub fn load() -> Result<Environment, UnknownEnvironmentError> {
        match std::env::var(APP_ENVIRONMENT_ENV_NAME) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Environment::default()),
        }
    }

    /// Whether logs should be machine-readable JSON instead of console output.
    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod | Self::Staging)
    }

    /// Name of the stage-specific file layered over `base.yaml`.
    pub fn config_file_name(&self) -> String {
        format!("{self}.yaml")
    }

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Prod => PROD_ENV_NAME,
            Environment::Staging => STAGING_ENV_NAME,
            Environment::Dev => DEV_ENV_NAME,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironmentError;

    /// Parses a stage name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            PROD_ENV_NAME => Ok(Self::Prod),
            STAGING_ENV_NAME => Ok(Self::Staging),
            DEV_ENV_NAME => Ok(Self::Dev),
            _ => Err(UnknownEnvironmentError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names_are_case_insensitive() {
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
        assert_eq!(
            " Staging ".parse::<Environment>().unwrap(),
            Environment::Staging
        );
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Dev);
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        let err = "qa".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("`qa` is not a supported environment"));
    }

    #[test]
    fn test_only_prod_like_stages_log_json() {
        assert!(Environment::Prod.is_prod());
        assert!(Environment::Staging.is_prod());
        assert!(!Environment::Dev.is_prod());
    }

    #[test]
    fn test_stage_file_names() {
        assert_eq!(Environment::default().config_file_name(), "prod.yaml");
        assert_eq!(Environment::Dev.config_file_name(), "dev.yaml");
    }
}
