use serde::{Deserialize, Serialize};

/// Configuration of the image pipeline to start.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// ARN of the image pipeline whose execution is started on every invocation.
    ///
    /// When absent, every invocation is answered with a failure response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

impl PipelineConfig {
    /// Returns the configured ARN as given, treating a blank value as absent.
    pub fn arn(&self) -> Option<&str> {
        self.arn.as_deref().filter(|arn| !arn.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_arn_is_absent() {
        let config = PipelineConfig {
            arn: Some("  ".to_string()),
        };
        assert_eq!(config.arn(), None);

        let config = PipelineConfig { arn: None };
        assert_eq!(config.arn(), None);
    }

    #[test]
    fn test_arn_is_returned_unchanged() {
        let config = PipelineConfig {
            arn: Some(" arn:aws:imagebuilder:eu-west-1:1:image-pipeline/x ".to_string()),
        };
        assert_eq!(
            config.arn(),
            Some(" arn:aws:imagebuilder:eu-west-1:1:image-pipeline/x ")
        );
    }
}
