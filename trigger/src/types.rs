use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the image pipeline to start, an ARN such as
/// `arn:aws:imagebuilder:eu-west-1:123456789012:image-pipeline/golden-ami`.
///
/// The value is opaque: beyond being present and not blank it is handed to the service as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineArn(String);

impl PipelineArn {
    /// Creates a [`PipelineArn`], returning `None` when the value is empty or only whitespace.
    ///
    /// Any other value is kept byte for byte.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();

        if value.trim().is_empty() {
            return None;
        }

        Some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PipelineArn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PipelineArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Acknowledgment returned by the service once a pipeline execution has been requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionAck {
    /// Identifier of the request that started the execution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Idempotency token the request was sent with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    /// ARN of the image build version created by the execution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_build_version_arn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pipeline_arn_is_rejected() {
        assert_eq!(PipelineArn::new(""), None);
        assert_eq!(PipelineArn::new(" \t\n"), None);
    }

    #[test]
    fn test_pipeline_arn_is_kept_as_given() {
        let arn = PipelineArn::new(" arn:aws:imagebuilder:eu-west-1:1:image-pipeline/x\n").unwrap();
        assert_eq!(
            arn.as_str(),
            " arn:aws:imagebuilder:eu-west-1:1:image-pipeline/x\n"
        );
        assert_eq!(arn.to_string(), arn.as_str());
    }

    #[test]
    fn test_pipeline_arn_is_otherwise_opaque() {
        let arn = PipelineArn::new("not-an-arn").unwrap();
        assert_eq!(arn.as_ref(), "not-an-arn");
    }
}
