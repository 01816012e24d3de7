use trigger::error::TriggerResult;
use trigger_config::shared::TriggerConfig;
use trigger_config::{Environment, load_config};

/// Loads the [`TriggerConfig`] for `environment` and validates it.
pub fn load_trigger_config(environment: Environment) -> TriggerResult<TriggerConfig> {
    let config = load_config::<TriggerConfig>(environment)?;
    config.validate()?;

    Ok(config)
}
