use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::SerializableSecretString;
use crate::shared::ValidationError;

/// Configuration of the client used to start image pipeline executions.
///
/// Each variant corresponds to a different client implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientConfig {
    /// In-memory client that acknowledges every request without calling the service.
    ///
    /// Useful for exercising a deployment end to end without producing images.
    Memory,
    /// AWS EC2 Image Builder client.
    ///
    /// Every field is optional; anything left unset is resolved by the default AWS provider
    /// chain of the function's execution environment.
    ImageBuilder {
        /// AWS region of the image pipeline, e.g. `eu-west-1`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<String>,
        /// Endpoint override, e.g. for a local emulator or a VPC endpoint.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint_url: Option<String>,
        /// Static credentials used instead of the default provider chain.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        credentials: Option<StaticCredentialsConfig>,
    },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::ImageBuilder {
            region: None,
            endpoint_url: None,
            credentials: None,
        }
    }
}

impl ClientConfig {
    /// Validates the client configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ClientConfig::Memory => Ok(()),
            ClientConfig::ImageBuilder {
                region,
                endpoint_url,
                credentials,
            } => {
                if let Some(region) = region {
                    if region.trim().is_empty() {
                        return Err(ValidationError::BlankRegion);
                    }
                }

                if let Some(endpoint_url) = endpoint_url {
                    if !endpoint_url.starts_with("http://") && !endpoint_url.starts_with("https://")
                    {
                        return Err(ValidationError::InvalidEndpointUrl(endpoint_url.clone()));
                    }
                }

                if let Some(credentials) = credentials {
                    credentials.validate()?;
                }

                Ok(())
            }
        }
    }
}

/// Static AWS credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticCredentialsConfig {
    /// AWS access key id.
    pub access_key_id: String,
    /// AWS secret access key.
    pub secret_access_key: SerializableSecretString,
    /// Session token for temporary credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<SerializableSecretString>,
}

impl StaticCredentialsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.access_key_id.trim().is_empty() {
            return Err(ValidationError::BlankCredential("access_key_id"));
        }

        if self.secret_access_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::BlankCredential("secret_access_key"));
        }

        Ok(())
    }
}
