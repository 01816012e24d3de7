use serde_json::Value;
use tracing::{error, info};
use trigger_config::PIPELINE_ARN_ENV_NAME;

use crate::bail;
use crate::clients::ImagePipelineClient;
use crate::error::{ErrorKind, TriggerResult};
use crate::response::HandlerResponse;
use crate::types::{ExecutionAck, PipelineArn};

/// Message returned when the pipeline execution was started.
pub const SUCCESS_MESSAGE: &str = "Image pipeline execution started";

/// Prefix of the message returned when the pipeline execution could not be started.
pub const FAILURE_MESSAGE_PREFIX: &str = "Failed to start image pipeline execution";

/// Starts one execution of the configured image pipeline per invocation.
///
/// The pipeline ARN is resolved once, when the trigger is built, and never changes afterwards. A
/// trigger built without an ARN still answers every invocation, with a failure response.
#[derive(Debug)]
pub struct PipelineTrigger<C> {
    client: C,
    pipeline_arn: Option<PipelineArn>,
}

impl<C> PipelineTrigger<C>
where
    C: ImagePipelineClient,
{
    pub fn new(client: C, pipeline_arn: Option<PipelineArn>) -> Self {
        Self {
            client,
            pipeline_arn,
        }
    }

    pub fn pipeline_arn(&self) -> Option<&PipelineArn> {
        self.pipeline_arn.as_ref()
    }

    /// Handles one invocation.
    ///
    /// The event is only logged. Exactly one start request is sent when an ARN is configured,
    /// none otherwise. Every failure is reported through the returned response, with status 500
    /// and the error text in the body.
    pub async fn handle(&self, event: &Value) -> HandlerResponse {
        info!(%event, "received invocation event");

        match self.start_execution().await {
            Ok(ack) => {
                info!(
                    request_id = ack.request_id.as_deref(),
                    client_token = ack.client_token.as_deref(),
                    image_build_version_arn = ack.image_build_version_arn.as_deref(),
                    "image pipeline execution started"
                );

                HandlerResponse::success(SUCCESS_MESSAGE)
            }
            Err(err) => {
                error!(%event, error = %err, "failed to start image pipeline execution");

                HandlerResponse::failure(&format!("{FAILURE_MESSAGE_PREFIX}: {err}"))
            }
        }
    }

    async fn start_execution(&self) -> TriggerResult<ExecutionAck> {
        let Some(pipeline_arn) = &self.pipeline_arn else {
            bail!(
                ErrorKind::MissingPipelineArn,
                "No image pipeline ARN is configured",
                format!("set the {PIPELINE_ARN_ENV_NAME} environment variable")
            );
        };

        self.client.start_pipeline_execution(pipeline_arn).await
    }
}
