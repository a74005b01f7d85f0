//! Error types for castview.
//!
//! This module defines the centralized error type [`CastviewError`] and a type alias
//! [`Result`] used by every fallible operation in the crate. The conversation
//! flattener itself never fails; errors come from decoding payloads, reading
//! configuration, building requests, and driving the screen state machine.

use thiserror::Error;

/// The main error type for castview operations.
///
/// Most variants carry a description string. Decoding and I/O failures wrap the
/// underlying error using `#[from]` for automatic conversion with `?`.
///
/// # Examples
///
/// ```
/// use castview::CastviewError;
///
/// fn validate_limit(limit: u32) -> Result<(), CastviewError> {
///     if limit == 0 {
///         return Err(CastviewError::Config("page_limit must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_limit(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum CastviewError {
    /// An upstream payload could not be decoded.
    ///
    /// Wraps the `serde_json` error, which includes the line and column of the
    /// offending token.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or stream I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is malformed or holds an out-of-range value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request could not be described from the current state.
    ///
    /// Raised, for example, when a profile list is requested before the profile
    /// itself is known.
    #[error("Request error: {0}")]
    Request(String),

    /// An event arrived that the current screen state cannot accept.
    #[error("State error: {0}")]
    State(String),
}

/// A specialized `Result` type for castview operations.
pub type Result<T> = std::result::Result<T, CastviewError>;
