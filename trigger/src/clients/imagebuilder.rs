use aws_config::{BehaviorVersion, Region};
use aws_sdk_imagebuilder::Client;
use aws_sdk_imagebuilder::config::Credentials;
use aws_sdk_imagebuilder::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_imagebuilder::operation::start_image_pipeline_execution::{
    StartImagePipelineExecutionError, StartImagePipelineExecutionOutput,
};
use secrecy::ExposeSecret;
use tracing::{debug, error};
use trigger_config::shared::StaticCredentialsConfig;

use crate::clients::base::ImagePipelineClient;
use crate::error::{ErrorKind, TriggerError, TriggerResult};
use crate::trigger_error;
use crate::types::{ExecutionAck, PipelineArn};

/// Provider name reported for credentials coming from the configuration.
const STATIC_CREDENTIALS_PROVIDER: &str = "trigger-config";

/// AWS EC2 Image Builder client.
#[derive(Debug, Clone)]
pub struct ImageBuilderClient {
    client: Client,
}

impl ImageBuilderClient {
    /// Creates a new client from the default AWS provider chain.
    ///
    /// `region`, `endpoint_url` and `credentials` override what the provider chain would resolve
    /// on its own.
    pub async fn new(
        region: Option<&str>,
        endpoint_url: Option<&str>,
        credentials: Option<&StaticCredentialsConfig>,
    ) -> ImageBuilderClient {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }

        if let Some(endpoint_url) = endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        if let Some(credentials) = credentials {
            let credentials = Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.expose_secret().to_string(),
                credentials
                    .session_token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string()),
                None,
                STATIC_CREDENTIALS_PROVIDER,
            );
            loader = loader.credentials_provider(credentials);
        }

        let config = loader.load().await;

        ImageBuilderClient::from_client(Client::new(&config))
    }

    /// Wraps an already configured SDK client.
    pub fn from_client(client: Client) -> ImageBuilderClient {
        ImageBuilderClient { client }
    }
}

impl ImagePipelineClient for ImageBuilderClient {
    async fn start_pipeline_execution(
        &self,
        pipeline_arn: &PipelineArn,
    ) -> TriggerResult<ExecutionAck> {
        debug!(%pipeline_arn, "sending start image pipeline execution request");

        // The SDK fills in the idempotency client token.
        let output = self
            .client
            .start_image_pipeline_execution()
            .image_pipeline_arn(pipeline_arn.as_str())
            .send()
            .await
            .map_err(|err| {
                error!(
                    %pipeline_arn,
                    error = %DisplayErrorContext(&err),
                    "start image pipeline execution request failed"
                );

                remote_call_failed(&err)
            })?;

        Ok(execution_ack(output))
    }
}

fn execution_ack(output: StartImagePipelineExecutionOutput) -> ExecutionAck {
    ExecutionAck {
        request_id: output.request_id().map(str::to_string),
        client_token: output.client_token().map(str::to_string),
        image_build_version_arn: output.image_build_version_arn().map(str::to_string),
    }
}

fn remote_call_failed(err: &SdkError<StartImagePipelineExecutionError>) -> TriggerError {
    trigger_error!(
        ErrorKind::RemoteCallFailed,
        "Image pipeline execution request failed",
        describe_sdk_error(err)
    )
}

/// Describes an SDK error as `<code>: <message>` when the service returned error metadata.
///
/// Errors that never reached the service (dispatch, timeout, credentials) have no metadata and are
/// described by their full error chain instead.
fn describe_sdk_error(err: &SdkError<StartImagePipelineExecutionError>) -> String {
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(err).to_string(),
    }
}
