//! Error types for HCL conversion.

use thiserror::Error;

/// Errors that can occur while converting HCL into a value tree.
#[derive(Error, Debug)]
pub enum TfxError {
    /// The CST did not have the shape the compiler requires (wrong arity,
    /// missing child, failed splice navigation). Indicates a grammar/compiler
    /// mismatch rather than bad input data; never recovered locally.
    #[error("structural error: {0}")]
    Structural(String),

    /// An HCL construct outside the supported taxonomy, reported only in
    /// strict mode. The default policy logs a diagnostic and substitutes an
    /// empty string instead.
    #[error("unsupported HCL construct: {0}")]
    Unsupported(String),

    /// The external document converter failed: it could not be spawned,
    /// exited non-zero, or produced output that was not valid UTF-8.
    #[error("converter error: {0}")]
    Converter(String),

    /// The converter's output was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convenience alias used throughout tfx-core.
pub type Result<T> = std::result::Result<T, TfxError>;
