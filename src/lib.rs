//! Client binding for the HP Cloud compute API.
//!
//! The crate validates server creation requests, encodes them as the
//! provider's JSON payload, and sends them to the tenant's server collection
//! with an `X-Auth-Token` header. Token acquisition is left to the caller.

pub mod compute;
pub mod config;
pub mod endpoints;
pub mod flavor;
pub mod image;
pub mod server;
pub mod test_support;
pub mod transport;
pub mod user_data;

pub use compute::{Access, ComputeClient, ComputeError, create_server};
pub use config::{ComputeConfig, ConfigError};
pub use endpoints::EndpointError;
pub use flavor::{Flavor, FlavorRef, UnknownFlavor};
pub use image::{ImageRef, KNOWN_IMAGES, UnknownImage};
pub use server::{
    MAX_PERSONALITY_BYTES, SecurityGroup, ServerRequest, ServerRequestBuilder, ValidationError,
    serialize,
};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
pub use user_data::{UserDataError, resolve_user_data};
