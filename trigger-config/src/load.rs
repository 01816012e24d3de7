use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

use crate::environment::Environment;

/// Directory containing configuration files relative to the working directory.
const CONFIGURATION_DIR: &str = "configuration";

/// Base configuration file loaded for all environments.
const BASE_CONFIG_FILE: &str = "base.yaml";

/// Prefix for environment variable configuration overrides.
const ENV_PREFIX: &str = "APP";

/// Separator between environment variable prefix and key segments.
const ENV_PREFIX_SEPARATOR: &str = "_";

/// Separator for nested configuration keys in environment variables.
///
/// Example: `APP_SENTRY__DSN` sets the `sentry.dsn` field.
const ENV_SEPARATOR: &str = "__";

/// Environment variable holding the image pipeline ARN.
///
/// Kept under its historical name so existing function deployments keep working unchanged.
pub const PIPELINE_ARN_ENV_NAME: &str = "IMG_BUILDER_ARN";

/// Configuration key overridden by [`PIPELINE_ARN_ENV_NAME`].
const PIPELINE_ARN_KEY: &str = "pipeline.arn";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("failed to determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to build configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Loads hierarchical configuration from YAML files and environment variables.
///
/// Loads configuration in this order, later sources overriding earlier ones:
/// 1. Base configuration from `configuration/base.yaml`, if present
/// 2. Environment-specific file from `configuration/{environment}.yaml`, if present
/// 3. Environment variable overrides prefixed with `APP`
/// 4. The pipeline ARN from `IMG_BUILDER_ARN`, if set and not blank
///
/// Nested keys use double underscores: `APP_PIPELINE__ARN` → `pipeline.arn`.
pub fn load_config<T>(environment: Environment) -> Result<T, LoadConfigError>
where
    T: DeserializeOwned,
{
    let base_path = std::env::current_dir().map_err(LoadConfigError::CurrentDir)?;
    let pipeline_arn = std::env::var(PIPELINE_ARN_ENV_NAME).ok();

    load_config_from(
        &base_path.join(CONFIGURATION_DIR),
        environment,
        pipeline_arn,
    )
}

/// Loads configuration from an explicit directory and environment.
///
/// This is the body of [`load_config`] with the process-level inputs lifted into arguments.
pub fn load_config_from<T>(
    configuration_directory: &Path,
    environment: Environment,
    pipeline_arn: Option<String>,
) -> Result<T, LoadConfigError>
where
    T: DeserializeOwned,
{
    let environment_source = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_PREFIX_SEPARATOR)
        .separator(ENV_SEPARATOR);

    // A blank ARN must not shadow one coming from the files.
    let pipeline_arn = pipeline_arn.filter(|arn| !arn.trim().is_empty());

    let settings = config::Config::builder()
        // Files are optional since a function deployment is usually configured through its
        // environment alone.
        .add_source(
            config::File::from(configuration_directory.join(BASE_CONFIG_FILE)).required(false),
        )
        .add_source(
            config::File::from(configuration_directory.join(environment.config_file_name()))
                .required(false),
        )
        // E.g. `APP_CLIENT__IMAGE_BUILDER__REGION=eu-west-1` sets
        // `TriggerConfig { client: ImageBuilder { region } }` to `eu-west-1`.
        .add_source(environment_source)
        .set_override_option(PIPELINE_ARN_KEY, pipeline_arn)?
        .build()?;

    Ok(settings.try_deserialize::<T>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{ClientConfig, TriggerConfig};
    use std::fs;

    const ARN: &str = "arn:aws:imagebuilder:eu-west-1:123456789012:image-pipeline/golden-ami";

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_defaults_when_no_files_exist() {
        let dir = tempfile::tempdir().unwrap();

        let config: TriggerConfig = load_config_from(dir.path(), Environment::Prod, None).unwrap();

        assert!(config.pipeline.arn.is_none());
        assert!(config.sentry.is_none());
        assert!(matches!(
            config.client,
            ClientConfig::ImageBuilder {
                region: None,
                endpoint_url: None,
                credentials: None,
            }
        ));
    }

    #[test]
    fn test_environment_file_overrides_base_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "base.yaml",
            "pipeline:\n  arn: base-arn\nclient:\n  image_builder:\n    region: us-east-1\n",
        );
        write(
            dir.path(),
            "dev.yaml",
            "client:\n  image_builder:\n    region: eu-west-1\n",
        );

        let config: TriggerConfig = load_config_from(dir.path(), Environment::Dev, None).unwrap();

        assert_eq!(config.pipeline.arn.as_deref(), Some("base-arn"));
        match config.client {
            ClientConfig::ImageBuilder { region, .. } => {
                assert_eq!(region.as_deref(), Some("eu-west-1"))
            }
            ClientConfig::Memory => panic!("expected the image builder client"),
        }
    }

    #[test]
    fn test_other_environment_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "dev.yaml", "client: memory\n");

        let config: TriggerConfig = load_config_from(dir.path(), Environment::Prod, None).unwrap();

        assert!(matches!(config.client, ClientConfig::ImageBuilder { .. }));
    }

    #[test]
    fn test_pipeline_arn_variable_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "base.yaml", "pipeline:\n  arn: file-arn\n");

        let config: TriggerConfig =
            load_config_from(dir.path(), Environment::Prod, Some(ARN.to_string())).unwrap();

        assert_eq!(config.pipeline.arn.as_deref(), Some(ARN));
    }

    #[test]
    fn test_blank_pipeline_arn_variable_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "base.yaml", "pipeline:\n  arn: file-arn\n");

        let config: TriggerConfig =
            load_config_from(dir.path(), Environment::Prod, Some("   ".to_string())).unwrap();

        assert_eq!(config.pipeline.arn.as_deref(), Some("file-arn"));
    }

    #[test]
    fn test_memory_client_and_sentry_from_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "base.yaml",
            "client: memory\nsentry:\n  dsn: https://key@sentry.example.com/1\n",
        );

        let config: TriggerConfig = load_config_from(dir.path(), Environment::Prod, None).unwrap();

        assert!(matches!(config.client, ClientConfig::Memory));
        assert_eq!(
            config.sentry.map(|s| s.dsn).as_deref(),
            Some("https://key@sentry.example.com/1")
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "base.yaml", "client:\n  submarine: {}\n");

        let result = load_config_from::<TriggerConfig>(dir.path(), Environment::Prod, None);

        assert!(matches!(result, Err(LoadConfigError::Config(_))));
    }
}
