use serde::{Deserialize, Serialize};

/// Status code returned when the pipeline execution was started.
pub const STATUS_OK: u16 = 200;

/// Status code returned when the pipeline execution could not be started.
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Result returned to the function runtime for one invocation.
///
/// Serializes as `{"statusCode": 200, "body": "\"...\""}`: the body is the JSON encoding of a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    /// Creates a successful response carrying `message`.
    pub fn success(message: &str) -> Self {
        Self {
            status_code: STATUS_OK,
            body: encode_message(message),
        }
    }

    /// Creates a failed response carrying `message`.
    pub fn failure(message: &str) -> Self {
        Self {
            status_code: STATUS_INTERNAL_ERROR,
            body: encode_message(message),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

fn encode_message(message: &str) -> String {
    serde_json::Value::String(message.to_owned()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_json_encoded_string() {
        let response = HandlerResponse::success("Image pipeline execution started");

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "\"Image pipeline execution started\"");
        let decoded: String = serde_json::from_str(&response.body).unwrap();
        assert_eq!(decoded, "Image pipeline execution started");
    }

    #[test]
    fn test_failure_escapes_message() {
        let response = HandlerResponse::failure("failed: \"quoted\"");

        assert_eq!(response.status_code, 500);
        assert!(!response.is_success());
        let decoded: String = serde_json::from_str(&response.body).unwrap();
        assert_eq!(decoded, "failed: \"quoted\"");
    }

    #[test]
    fn test_serialized_field_names() {
        let response = HandlerResponse::success("ok");

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["body"], "\"ok\"");
    }
}
