//! Server creation requests and their JSON encoding.
//!
//! A [`ServerRequest`] describes a single instance to create. It is validated
//! and encoded once per creation attempt by [`serialize`]; validation runs in a
//! fixed order and the first failure is returned without producing any bytes.

mod error;
mod wire;

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::flavor::FlavorRef;
use crate::image::ImageRef;
use wire::CreateServerEnvelope;

pub use error::ValidationError;

/// Largest personality payload accepted by the provider, in bytes.
pub const MAX_PERSONALITY_BYTES: usize = 255;

/// Named firewall rule set attached to a server.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SecurityGroup {
    /// Group name as registered with the provider.
    pub name: String,
}

impl SecurityGroup {
    /// Creates a security group reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Parameters for creating one server.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ServerRequest {
    /// Sizing tier code.
    pub flavor: FlavorRef,
    /// Boot image identifier.
    pub image: ImageRef,
    /// Instance name.
    pub name: String,
    /// SSH key-pair name.
    pub key_name: Option<String>,
    /// Whether to attach a configuration drive.
    pub config_drive: bool,
    /// Minimum number of instances to create.
    pub min_count: Option<NonZeroU32>,
    /// Maximum number of instances to create.
    pub max_count: Option<NonZeroU32>,
    /// File content injected into the instance filesystem at boot.
    pub personality: Option<String>,
    /// User data, sent base64 encoded.
    pub user_data: Option<String>,
    /// Security groups in attachment order.
    pub security_groups: Vec<SecurityGroup>,
    /// Free-form metadata, keyed for deterministic output.
    pub metadata: BTreeMap<String, String>,
}

impl ServerRequest {
    /// Starts a builder for a [`ServerRequest`].
    #[must_use]
    pub fn builder() -> ServerRequestBuilder {
        ServerRequestBuilder::new()
    }

    /// Checks the request against the provider contract.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking the flavor, the
    /// image, the name, the personality size and finally the count range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.flavor.is_valid() {
            return Err(ValidationError::InvalidFlavor {
                code: self.flavor.code(),
            });
        }
        if self.image.is_unset() {
            return Err(ValidationError::MissingImage);
        }
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if let Some(personality) = &self.personality
            && personality.len() > MAX_PERSONALITY_BYTES
        {
            return Err(ValidationError::PersonalityTooLarge {
                len: personality.len(),
            });
        }
        if let (Some(min), Some(max)) = (self.min_count, self.max_count)
            && min > max
        {
            return Err(ValidationError::InvalidCountRange {
                min: min.get(),
                max: max.get(),
            });
        }
        Ok(())
    }

    /// Validates and encodes the request. See [`serialize`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the request breaks the provider
    /// contract.
    pub fn to_json(&self) -> Result<Vec<u8>, ValidationError> {
        serialize(self)
    }
}

/// Validates `request` and encodes it as the provider's creation payload.
///
/// # Errors
///
/// Returns [`ValidationError`] when validation fails; no bytes are produced in
/// that case.
pub fn serialize(request: &ServerRequest) -> Result<Vec<u8>, ValidationError> {
    request.validate()?;
    serde_json::to_vec(&CreateServerEnvelope::from(request)).map_err(|err| {
        ValidationError::Encoding {
            message: err.to_string(),
        }
    })
}

/// Builder for [`ServerRequest`].
///
/// String inputs for the name and key name are trimmed on build. Building does
/// not validate; [`serialize`] does.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ServerRequestBuilder {
    request: ServerRequest,
}

impl ServerRequestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flavor, either a [`crate::Flavor`] or a raw [`FlavorRef`].
    #[must_use]
    pub fn flavor(mut self, value: impl Into<FlavorRef>) -> Self {
        self.request.flavor = value.into();
        self
    }

    /// Sets the boot image.
    #[must_use]
    pub const fn image(mut self, value: ImageRef) -> Self {
        self.request.image = value;
        self
    }

    /// Sets the instance name.
    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.request.name = value.into();
        self
    }

    /// Sets the SSH key-pair name.
    #[must_use]
    pub fn key_name(mut self, value: Option<String>) -> Self {
        self.request.key_name = value;
        self
    }

    /// Enables or disables the configuration drive.
    #[must_use]
    pub const fn config_drive(mut self, value: bool) -> Self {
        self.request.config_drive = value;
        self
    }

    /// Sets the minimum instance count.
    #[must_use]
    pub const fn min_count(mut self, value: Option<NonZeroU32>) -> Self {
        self.request.min_count = value;
        self
    }

    /// Sets the maximum instance count.
    #[must_use]
    pub const fn max_count(mut self, value: Option<NonZeroU32>) -> Self {
        self.request.max_count = value;
        self
    }

    /// Sets the personality payload.
    #[must_use]
    pub fn personality(mut self, value: Option<String>) -> Self {
        self.request.personality = value;
        self
    }

    /// Sets the user data, in plain text.
    #[must_use]
    pub fn user_data(mut self, value: Option<String>) -> Self {
        self.request.user_data = value;
        self
    }

    /// Appends a security group.
    #[must_use]
    pub fn security_group(mut self, name: impl Into<String>) -> Self {
        self.request.security_groups.push(SecurityGroup::new(name));
        self
    }

    /// Inserts a metadata entry, replacing any previous value for the key.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.metadata.insert(key.into(), value.into());
        self
    }

    /// Finishes the request.
    #[must_use]
    pub fn build(self) -> ServerRequest {
        let mut request = self.request;
        request.name = request.name.trim().to_owned();
        request.key_name = request.key_name.map(|key| key.trim().to_owned());
        request
    }
}
