use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};
use trigger::clients::ImagePipelineClient;
use trigger::clients::imagebuilder::ImageBuilderClient;
use trigger::clients::memory::MemoryImagePipelineClient;
use trigger::handler::PipelineTrigger;
use trigger::response::HandlerResponse;
use trigger::types::PipelineArn;
use trigger_config::PIPELINE_ARN_ENV_NAME;
use trigger_config::shared::{ClientConfig, PipelineConfig, TriggerConfig};

/// Starts serving invocations with the provided configuration.
///
/// Builds the client selected by the configuration and hands a [`PipelineTrigger`] over to the
/// function runtime, which drives it until the execution environment is shut down.
pub async fn start_trigger_with_config(trigger_config: TriggerConfig) -> anyhow::Result<()> {
    info!("starting image pipeline trigger");

    log_config(&trigger_config);

    let pipeline_arn = trigger_config.pipeline.arn().and_then(PipelineArn::new);
    if pipeline_arn.is_none() {
        warn!(
            "no image pipeline arn configured, invocations will fail until {PIPELINE_ARN_ENV_NAME} is set"
        );
    }

    // For each client, we start serving. This is more verbose due to static dispatch.
    match &trigger_config.client {
        ClientConfig::Memory => {
            let client = MemoryImagePipelineClient::new();

            serve(PipelineTrigger::new(client, pipeline_arn)).await?;
        }
        ClientConfig::ImageBuilder {
            region,
            endpoint_url,
            credentials,
        } => {
            let client = ImageBuilderClient::new(
                region.as_deref(),
                endpoint_url.as_deref(),
                credentials.as_ref(),
            )
            .await;

            serve(PipelineTrigger::new(client, pipeline_arn)).await?;
        }
    }

    info!("image pipeline trigger stopped");

    Ok(())
}

fn log_config(config: &TriggerConfig) {
    log_pipeline_config(&config.pipeline);
    log_client_config(&config.client);
}

fn log_pipeline_config(config: &PipelineConfig) {
    debug!(pipeline_arn = config.arn(), "pipeline config");
}

fn log_client_config(config: &ClientConfig) {
    match config {
        ClientConfig::Memory => {
            debug!("using memory client config");
        }
        ClientConfig::ImageBuilder {
            region,
            endpoint_url,
            credentials,
        } => {
            debug!(
                region = region.as_deref(),
                endpoint_url = endpoint_url.as_deref(),
                static_credentials = credentials.is_some(),
                "using image builder client config"
            )
        }
    }
}

/// Serves invocations from the function runtime until it stops.
#[tracing::instrument(skip(trigger), fields(pipeline_arn = trigger.pipeline_arn().map(PipelineArn::as_str)))]
async fn serve<C>(trigger: PipelineTrigger<C>) -> anyhow::Result<()>
where
    C: ImagePipelineClient + Send + Sync + 'static,
{
    let trigger = Arc::new(trigger);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let trigger = trigger.clone();
        async move { handle_invocation(&trigger, event).await }
    }))
    .await
    .map_err(|err| anyhow::anyhow!(err))
}

/// Handles one invocation.
///
/// Never returns an error: failures are reported through the [`HandlerResponse`].
async fn handle_invocation<C>(
    trigger: &PipelineTrigger<C>,
    event: LambdaEvent<Value>,
) -> Result<HandlerResponse, lambda_runtime::Error>
where
    C: ImagePipelineClient,
{
    let LambdaEvent { payload, context } = event;
    let span = info_span!("invocation", request_id = %context.request_id);

    Ok(trigger.handle(&payload).instrument(span).await)
}
