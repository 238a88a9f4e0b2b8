//! Error types for the compute client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::endpoints::EndpointError;
use crate::server::ValidationError;
use crate::transport::TransportError;

/// Errors raised while creating a server.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ComputeError {
    /// Raised when the request breaks the provider contract. Nothing is sent.
    #[error("invalid server request: {0}")]
    Validation(#[from] ValidationError),
    /// Raised when the auth token or tenant identifier is empty.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
    /// Raised when the compute endpoint cannot address the server collection.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    /// Raised when the request cannot be delivered.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Raised when the provider answers with a non-success status.
    #[error("provider returned {status}: {}", String::from_utf8_lossy(.body))]
    Provider {
        /// Status returned by the provider.
        status: StatusCode,
        /// Response body exactly as received.
        body: Vec<u8>,
    },
}
