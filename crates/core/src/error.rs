use thiserror::Error;

/// Errors raised by the fallible (`try_*`) entry points.
///
/// The graceful entry points (`enhance`, `extract_components`, ...) never
/// return these; they log and fall back to passing the input through.
#[derive(Debug, Error)]
pub enum CpubError {
    /// lol_html failed while scanning or rewriting a content stream.
    #[error("HTML rewrite error: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
    /// IO error while serializing the document tree.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Serialized output was not valid UTF-8.
    #[error("Encoding error: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),
}

/// Reasons a base64(JSON) `attrs` payload can be rejected.
#[derive(Debug, Error)]
pub enum AttrsError {
    /// Payload is not valid base64.
    #[error("attrs payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Decoded bytes are not valid JSON.
    #[error("attrs payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Decoded JSON is valid but not an object.
    #[error("attrs payload must be a JSON object")]
    NotAnObject,
}
