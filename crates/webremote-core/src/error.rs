//! Error types for the web remote
//!
//! None of these are fatal to a page. Decode errors are logged and the
//! frame is dropped; validation errors are shown inline and the request
//! is not sent.

/// An inbound frame could not be turned into a [`crate::Response`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The text is not valid JSON.
    #[error("malformed JSON: {0}")]
    Malformed(String),

    /// The JSON value is not an object.
    #[error("message is not a JSON object")]
    NotAnObject,

    /// The message has no `func` tag and its kind cannot be inferred.
    #[error("untagged message: {0}")]
    Untagged(String),

    /// The tag is known but the fields do not match it.
    #[error("invalid {func} message: {reason}")]
    Schema { func: String, reason: String },
}

/// User input rejected before a request is sent.
///
/// The `Display` text is what the page shows in its notice element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Button must have a label first")]
    MissingLabel,

    #[error("Menu must have a name first")]
    MissingName,

    #[error("Addr and Cmd must be numbers")]
    NotNumeric,
}

/// An outbound command could not be serialized.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to encode command: {0}")]
    Json(#[from] serde_json::Error),
}
