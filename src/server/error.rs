//! Validation errors for server creation requests.

use thiserror::Error;

/// Errors raised while validating or encoding a [`super::ServerRequest`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    /// Raised when the flavor code does not refer to an existing flavor.
    #[error("flavor reference {code} refers to a non-existent flavor")]
    InvalidFlavor {
        /// Code supplied by the caller.
        code: u32,
    },
    /// Raised when no boot image was selected.
    #[error("an image reference is required")]
    MissingImage,
    /// Raised when the server name is empty.
    #[error("a server name is required")]
    MissingName,
    /// Raised when the personality payload exceeds the provider limit.
    #[error("personality is {len} bytes; at most 255 bytes are allowed")]
    PersonalityTooLarge {
        /// Length of the rejected payload in bytes.
        len: usize,
    },
    /// Raised when the minimum instance count exceeds the maximum.
    #[error("min_count {min} exceeds max_count {max}")]
    InvalidCountRange {
        /// Requested minimum count.
        min: u32,
        /// Requested maximum count.
        max: u32,
    },
    /// Raised when the JSON encoder rejects the payload.
    #[error("failed to encode server request: {message}")]
    Encoding {
        /// Message reported by the encoder.
        message: String,
    },
}
