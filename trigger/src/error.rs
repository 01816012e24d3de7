use std::error;
use std::fmt;

/// Convenient result type for trigger operations using [`TriggerError`] as the error type.
pub type TriggerResult<T> = Result<T, TriggerError>;

/// Main error type of the trigger.
///
/// A [`TriggerError`] carries an [`ErrorKind`], a static description and, optionally, a dynamic
/// detail such as the error code and message returned by the image building service.
#[derive(Debug, Clone)]
pub struct TriggerError {
    repr: ErrorRepr,
}

#[derive(Debug, Clone)]
enum ErrorRepr {
    /// Error with kind and static description
    WithDescription(ErrorKind, &'static str),
    /// Error with kind, static description, and dynamic detail
    WithDescriptionAndDetail(ErrorKind, &'static str, String),
}

/// Categories of errors that can occur while triggering a pipeline execution.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No pipeline ARN could be resolved from configuration.
    MissingPipelineArn,
    /// The request to start a pipeline execution did not complete successfully.
    ///
    /// Covers network faults, permission faults, malformed identifiers and service-side faults
    /// alike; they are reported, never retried.
    RemoteCallFailed,
    /// Configuration could not be loaded or is invalid.
    ConfigError,
}

impl TriggerError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::WithDescription(kind, _)
            | ErrorRepr::WithDescriptionAndDetail(kind, _, _) => kind,
        }
    }

    /// Returns the static description of this error.
    pub fn description(&self) -> &'static str {
        match self.repr {
            ErrorRepr::WithDescription(_, desc)
            | ErrorRepr::WithDescriptionAndDetail(_, desc, _) => desc,
        }
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        match self.repr {
            ErrorRepr::WithDescriptionAndDetail(_, _, ref detail) => Some(detail.as_str()),
            ErrorRepr::WithDescription(_, _) => None,
        }
    }
}

impl PartialEq for TriggerError {
    fn eq(&self, other: &TriggerError) -> bool {
        self.kind() == other.kind()
    }
}

impl fmt::Display for TriggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.repr {
            ErrorRepr::WithDescription(kind, desc) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;

                Ok(())
            }
            ErrorRepr::WithDescriptionAndDetail(kind, desc, ref detail) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;
                f.write_str(" -> ")?;
                detail.fmt(f)?;

                Ok(())
            }
        }
    }
}

impl error::Error for TriggerError {}

/// Creates a [`TriggerError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for TriggerError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> TriggerError {
        TriggerError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

/// Creates a [`TriggerError`] from an error kind, static description, and dynamic detail.
impl From<(ErrorKind, &'static str, String)> for TriggerError {
    fn from((kind, desc, detail): (ErrorKind, &'static str, String)) -> TriggerError {
        TriggerError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, desc, detail),
        }
    }
}

/// Converts [`trigger_config::LoadConfigError`] to [`TriggerError`] with
/// [`ErrorKind::ConfigError`].
impl From<trigger_config::LoadConfigError> for TriggerError {
    fn from(err: trigger_config::LoadConfigError) -> TriggerError {
        TriggerError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::ConfigError,
                "Configuration could not be loaded",
                err.to_string(),
            ),
        }
    }
}

/// Converts [`trigger_config::shared::ValidationError`] to [`TriggerError`] with
/// [`ErrorKind::ConfigError`].
impl From<trigger_config::shared::ValidationError> for TriggerError {
    fn from(err: trigger_config::shared::ValidationError) -> TriggerError {
        TriggerError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::ConfigError,
                "Configuration is invalid",
                err.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bail, trigger_error};
    use trigger_config::shared::ValidationError;

    #[test]
    fn test_display_includes_kind_description_and_detail() {
        let err = TriggerError::from((
            ErrorKind::RemoteCallFailed,
            "Image pipeline execution request failed",
            "AccessDeniedException: not authorized".to_string(),
        ));

        assert_eq!(
            err.to_string(),
            "RemoteCallFailed: Image pipeline execution request failed -> AccessDeniedException: not authorized"
        );
    }

    #[test]
    fn test_display_without_detail() {
        let err = TriggerError::from((ErrorKind::MissingPipelineArn, "No pipeline ARN"));

        assert_eq!(err.to_string(), "MissingPipelineArn: No pipeline ARN");
        assert_eq!(err.detail(), None);
        assert_eq!(err.description(), "No pipeline ARN");
    }

    #[test]
    fn test_macro_usage() {
        let err = trigger_error!(ErrorKind::ConfigError, "Something went wrong");
        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert_eq!(err.detail(), None);

        let err_with_detail = trigger_error!(
            ErrorKind::RemoteCallFailed,
            "Request failed",
            "ThrottlingException"
        );
        assert_eq!(err_with_detail.kind(), ErrorKind::RemoteCallFailed);
        assert_eq!(err_with_detail.detail(), Some("ThrottlingException"));
    }

    #[test]
    fn test_bail_macro() {
        fn test_function() -> TriggerResult<()> {
            bail!(ErrorKind::MissingPipelineArn, "Test error");
        }

        fn test_function_with_detail() -> TriggerResult<()> {
            bail!(ErrorKind::RemoteCallFailed, "Test error", "Additional detail");
        }

        let err = test_function().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPipelineArn);

        let err = test_function_with_detail().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteCallFailed);
        assert!(err.detail().unwrap().contains("Additional detail"));
    }

    #[test]
    fn test_validation_error_conversion() {
        let err = TriggerError::from(ValidationError::BlankRegion);

        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert!(err.detail().unwrap().contains("region"));
    }

    #[test]
    fn test_equality_compares_kinds() {
        let a = trigger_error!(ErrorKind::RemoteCallFailed, "a", "first");
        let b = trigger_error!(ErrorKind::RemoteCallFailed, "b", "second");
        let c = trigger_error!(ErrorKind::ConfigError, "a");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
