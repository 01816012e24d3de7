#![recursion_limit = "256"]

use crate::config::load_trigger_config;
use crate::core::start_trigger_with_config;
use std::sync::Arc;
use tracing::{error, info};
use trigger_config::Environment;
use trigger_config::shared::TriggerConfig;
use trigger_telemetry::init_tracing_with_top_level_fields;

mod config;
mod core;

fn main() -> anyhow::Result<()> {
    // Resolve the runtime environment once, everything below is configured for it
    let environment = Environment::load()?;

    // Load trigger config
    let trigger_config = load_trigger_config(environment)?;

    // Extract the pipeline arn to use in logs
    let pipeline_arn = trigger_config.pipeline.arn().map(str::to_string);

    // Initialize tracing with the pipeline arn
    init_tracing_with_top_level_fields(env!("CARGO_BIN_NAME"), environment, pipeline_arn)?;

    // Initialize Sentry before the async runtime starts
    let _sentry_guard = init_sentry(&trigger_config, environment)?;

    // We start the runtime.
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(trigger_config))?;

    Ok(())
}

async fn async_main(trigger_config: TriggerConfig) -> anyhow::Result<()> {
    // We start the trigger and catch any errors.
    if let Err(err) = start_trigger_with_config(trigger_config).await {
        sentry::integrations::anyhow::capture_anyhow(&err);
        error!("an error occurred in the image pipeline trigger: {err:#}");

        return Err(err);
    }

    Ok(())
}

/// Initializes Sentry if a DSN is configured.
///
/// Tags all errors with the "image-pipeline-trigger" service identifier and captures panics.
fn init_sentry(
    config: &TriggerConfig,
    environment: Environment,
) -> anyhow::Result<Option<sentry::ClientInitGuard>> {
    let Some(sentry_config) = &config.sentry else {
        info!("sentry not configured for image pipeline trigger, skipping initialization");

        return Ok(None);
    };

    info!("initializing sentry with supplied dsn");

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(sentry_config.dsn.parse()?),
        environment: Some(environment.to_string().into()),
        integrations: vec![Arc::new(
            sentry::integrations::panic::PanicIntegration::new(),
        )],
        ..Default::default()
    });

    sentry::configure_scope(|scope| {
        scope.set_tag("service", "image-pipeline-trigger");
    });

    Ok(Some(guard))
}
