/// Boxed error returned by a failing [`PartialMask`](crate::PartialMask).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while masking a JSON document.
///
/// No variant carries a partially masked document: either the whole
/// document is masked, or one of these errors is returned.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum MaskingError {
    /// A required argument is missing, empty or blank.
    ///
    /// Occurs when the JSON text is missing or only contains whitespace, or
    /// when no blacklist is provided at all.
    #[display("Value cannot be null or empty. (Parameter '{parameter}')")]
    #[from(skip)]
    InvalidInput {
        /// Name of the offending parameter (`json` or `blacklist`).
        parameter: &'static str,
    },

    /// The input is not valid JSON.
    ///
    /// Carries the diagnostic of the underlying parser.
    #[display("Malformed JSON input: {_0}")]
    MalformedInput(serde_json::Error),

    /// A partial mask failed while redacting a matched property.
    ///
    /// The whole masking operation is aborted.
    #[display("An error occurred while executing the function in the dictionary value. {message}")]
    #[from(skip)]
    TransformFailure {
        /// Path of the property being redacted.
        path: String,
        /// Message of the error raised by the partial mask.
        message: String,
    },

    /// A wildcard pattern could not be compiled.
    #[display("Invalid wildcard pattern '{pattern}': {error}")]
    #[from(skip)]
    InvalidPattern {
        /// The raw wildcard pattern.
        pattern: String,
        /// The regex compilation error.
        error: regex::Error,
    },

    /// A matched location could not be read or written back.
    #[display("Failed to redact value at '{pointer}': {message}")]
    #[from(skip)]
    RedactionError {
        /// JSON Pointer of the matched value.
        pointer: String,
        /// Description of the failure.
        message: String,
    },

    /// The masked document could not be serialized.
    #[display("Failed to serialize masked JSON: {_0}")]
    #[from(skip)]
    SerializationError(serde_json::Error),
}

impl MaskingError {
    pub(crate) fn transform_failure(path: &str, error: &BoxError) -> Self {
        Self::TransformFailure {
            path: path.to_string(),
            message: error.to_string(),
        }
    }
}
