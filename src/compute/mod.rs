//! Client for the compute service's server collection.

mod error;

use tracing::{debug, info, warn};

use reqwest::Url;

use crate::endpoints::{COMPUTE_URL, EndpointError, servers_url};
use crate::server::{ServerRequest, serialize};
use crate::transport::{HttpTransport, RawResponse, Transport};

pub use error::ComputeError;

/// Token and tenant issued by the identity service.
#[derive(Clone, Eq, PartialEq)]
pub struct Access {
    /// Opaque bearer token sent as `X-Auth-Token`.
    pub token: String,
    /// Tenant under which resources are created.
    pub tenant_id: String,
}

impl Access {
    /// Creates an access pair.
    #[must_use]
    pub fn new(token: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tenant_id: tenant_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ComputeError> {
        if self.token.trim().is_empty() {
            return Err(ComputeError::MissingCredential("auth token"));
        }
        if self.tenant_id.trim().is_empty() {
            return Err(ComputeError::MissingCredential("tenant id"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Access")
            .field("token", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

/// Validates, encodes and sends a server creation request.
///
/// The request is POSTed to `<compute_url>/<tenant_id>/servers`. A 2xx answer
/// is returned untouched; any other status becomes [`ComputeError::Provider`]
/// carrying the status and body.
///
/// # Errors
///
/// Returns [`ComputeError::Validation`], [`ComputeError::MissingCredential`]
/// or [`ComputeError::Endpoint`] before anything is sent,
/// [`ComputeError::Transport`] when delivery fails, and
/// [`ComputeError::Provider`] for non-success statuses.
pub async fn create_server<T>(
    request: &ServerRequest,
    access: &Access,
    compute_url: &str,
    transport: &T,
) -> Result<RawResponse, ComputeError>
where
    T: Transport + ?Sized,
{
    let body = serialize(request)?;
    access.validate()?;

    let url = servers_url(compute_url, &access.tenant_id)?;
    debug!(
        %url,
        name = %request.name,
        flavor = %request.flavor,
        image = %request.image,
        "creating server"
    );

    let response = transport
        .post_json(url.as_str(), &access.token, body)
        .await?;
    if response.is_success() {
        info!(status = %response.status, name = %request.name, "server creation accepted");
        return Ok(response);
    }

    warn!(status = %response.status, name = %request.name, "server creation rejected");
    Err(ComputeError::Provider {
        status: response.status,
        body: response.body,
    })
}

/// Compute service client bound to an endpoint, credentials and transport.
#[derive(Clone, Debug)]
pub struct ComputeClient<T = HttpTransport> {
    transport: T,
    access: Access,
    compute_url: String,
}

impl ComputeClient<HttpTransport> {
    /// Creates a client for the default regional endpoint over HTTP.
    #[must_use]
    pub fn new(access: Access) -> Self {
        Self::with_transport(access, HttpTransport::new())
    }
}

impl<T: Transport> ComputeClient<T> {
    /// Creates a client that sends through `transport`.
    #[must_use]
    pub fn with_transport(access: Access, transport: T) -> Self {
        Self {
            transport,
            access,
            compute_url: COMPUTE_URL.to_owned(),
        }
    }

    /// Overrides the compute endpoint root.
    #[must_use]
    pub fn compute_url(mut self, value: impl Into<String>) -> Self {
        self.compute_url = value.into();
        self
    }

    /// Returns the server collection URL this client posts to.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] when the configured endpoint is unusable.
    pub fn servers_url(&self) -> Result<Url, EndpointError> {
        servers_url(&self.compute_url, &self.access.tenant_id)
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates a server. See [`create_server`].
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError`] as described for [`create_server`].
    pub async fn create_server(
        &self,
        request: &ServerRequest,
    ) -> Result<RawResponse, ComputeError> {
        create_server(request, &self.access, &self.compute_url, &self.transport).await
    }
}
