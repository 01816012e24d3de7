use std::future::Future;

use crate::error::TriggerResult;
use crate::types::{ExecutionAck, PipelineArn};

/// A service able to start executions of an image pipeline.
pub trait ImagePipelineClient {
    /// Requests one execution of the pipeline identified by `pipeline_arn`.
    ///
    /// Implementations make a single attempt and report any failure as
    /// [`crate::error::ErrorKind::RemoteCallFailed`].
    fn start_pipeline_execution(
        &self,
        pipeline_arn: &PipelineArn,
    ) -> impl Future<Output = TriggerResult<ExecutionAck>> + Send;
}
