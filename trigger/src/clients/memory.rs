use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::clients::base::ImagePipelineClient;
use crate::error::{ErrorKind, TriggerResult};
use crate::trigger_error;
use crate::types::{ExecutionAck, PipelineArn};

#[derive(Debug)]
struct Inner {
    requests: Vec<PipelineArn>,
    failure: Option<String>,
}

/// In-memory client that records every request instead of calling the service.
///
/// Acknowledges each request unless built with [`MemoryImagePipelineClient::failing`], in which
/// case every request fails with [`ErrorKind::RemoteCallFailed`] and the given detail.
#[derive(Debug, Clone)]
pub struct MemoryImagePipelineClient {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryImagePipelineClient {
    pub fn new() -> Self {
        Self::with_failure(None)
    }

    /// Creates a client whose requests all fail with `detail`, e.g. `"AccessDenied"`.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self::with_failure(Some(detail.into()))
    }

    fn with_failure(failure: Option<String>) -> Self {
        let inner = Inner {
            requests: Vec::new(),
            failure,
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Returns every pipeline ARN a start was requested for, in request order.
    pub async fn requests(&self) -> Vec<PipelineArn> {
        self.inner.lock().await.requests.clone()
    }
}

impl Default for MemoryImagePipelineClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePipelineClient for MemoryImagePipelineClient {
    async fn start_pipeline_execution(
        &self,
        pipeline_arn: &PipelineArn,
    ) -> TriggerResult<ExecutionAck> {
        let mut inner = self.inner.lock().await;
        inner.requests.push(pipeline_arn.clone());

        if let Some(failure) = &inner.failure {
            return Err(trigger_error!(
                ErrorKind::RemoteCallFailed,
                "Image pipeline execution request failed",
                failure
            ));
        }

        let execution = inner.requests.len();
        info!(%pipeline_arn, execution, "recorded image pipeline execution request");

        Ok(ExecutionAck {
            request_id: Some(format!("memory-{execution}")),
            client_token: None,
            image_build_version_arn: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arn() -> PipelineArn {
        PipelineArn::new("arn:aws:imagebuilder:eu-west-1:123456789012:image-pipeline/golden-ami")
            .unwrap()
    }

    #[tokio::test]
    async fn test_requests_are_recorded_and_acknowledged() {
        let client = MemoryImagePipelineClient::new();

        let first = client.start_pipeline_execution(&arn()).await.unwrap();
        let second = client.start_pipeline_execution(&arn()).await.unwrap();

        assert_eq!(first.request_id.as_deref(), Some("memory-1"));
        assert_eq!(second.request_id.as_deref(), Some("memory-2"));
        assert_eq!(client.requests().await, vec![arn(), arn()]);
    }

    #[tokio::test]
    async fn test_failing_client_records_and_fails() {
        let client = MemoryImagePipelineClient::failing("AccessDenied");

        let err = client.start_pipeline_execution(&arn()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RemoteCallFailed);
        assert_eq!(err.detail(), Some("AccessDenied"));
        assert_eq!(client.requests().await.len(), 1);
    }
}
