use serde::{Deserialize, Serialize};

use crate::shared::{ClientConfig, PipelineConfig, SentryConfig, ValidationError};

/// Complete configuration of the image pipeline trigger.
///
/// Every section has a default so that a deployment configured only through `IMG_BUILDER_ARN`
/// loads successfully.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TriggerConfig {
    /// The image pipeline to start.
    pub pipeline: PipelineConfig,
    /// The client used to reach the image building service.
    pub client: ClientConfig,
    /// Optional Sentry configuration for error tracking.
    ///
    /// If provided, enables Sentry error reporting. If `None`, the trigger operates without Sentry
    /// integration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentry: Option<SentryConfig>,
}

impl TriggerConfig {
    /// Validates the complete trigger configuration.
    ///
    /// A missing pipeline ARN is not a validation error, it is reported on each invocation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.client.validate()
    }
}
