use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;

/// AWS credential material read from configuration.
///
/// Deserializes straight into a [`SecretString`] so the value never sits in a plain `String` of
/// the configuration tree, and stays redacted whenever the configuration is logged with `Debug`.
#[derive(Clone, Debug)]
pub struct SerializableSecretString(SecretString);

impl Deref for SerializableSecretString {
    type Target = SecretString;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for SerializableSecretString {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl Serialize for SerializableSecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.expose_secret())
    }
}

impl<'de> Deserialize<'de> for SerializableSecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::StaticCredentialsConfig;

    #[test]
    fn test_credentials_are_redacted_in_debug_output() {
        let credentials: StaticCredentialsConfig = serde_json::from_str(
            r#"{"access_key_id": "AKIAEXAMPLE", "session_token": "FwoGZXIvYXdzE", "secret_access_key": "wJalrXUtnFEMI"}"#,
        )
        .unwrap();

        let debug = format!("{credentials:?}");

        assert!(debug.contains("AKIAEXAMPLE"));
        assert!(!debug.contains("wJalrXUtnFEMI"));
        assert!(!debug.contains("FwoGZXIvYXdzE"));
        assert_eq!(credentials.secret_access_key.expose_secret(), "wJalrXUtnFEMI");
    }
}
