use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// An explicit region was configured but it is blank.
    #[error("`region` cannot be blank when set")]
    BlankRegion,
    /// The endpoint override is not an http(s) URL.
    #[error("`endpoint_url` must start with `http://` or `https://`, got `{0}`")]
    InvalidEndpointUrl(String),
    /// Static credentials were configured with a blank field.
    #[error("static credentials require a non-blank `{0}`")]
    BlankCredential(&'static str),
}
