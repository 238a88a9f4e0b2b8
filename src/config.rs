//! Configuration loading via `ortho-config`.

use std::fmt;

use ortho_config::OrthoConfig;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use thiserror::Error;

use crate::compute::Access;
use crate::flavor::{Flavor, UnknownFlavor};
use crate::image::{ImageRef, UnknownImage};

/// Compute client configuration derived from environment variables,
/// configuration files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "HPCLOUD")]
pub struct ComputeConfig {
    /// Token issued by the identity service. Required to send requests.
    #[serde(default, deserialize_with = "optional_text")]
    pub auth_token: Option<String>,
    /// Tenant under which servers are created. Required to send requests.
    /// Tenant identifiers are usually numeric.
    #[serde(default, deserialize_with = "optional_text")]
    pub tenant_id: Option<String>,
    /// Compute service root. Defaults to the `region-b.geo-1` endpoint.
    #[ortho_config(default = crate::endpoints::COMPUTE_URL.to_owned())]
    pub compute_url: String,
    /// Flavor used when a request does not name one.
    #[ortho_config(default = "small".to_owned())]
    pub default_flavor: String,
    /// Image label or identifier used when a request does not name one.
    #[ortho_config(default = "ubuntu-precise-12-04".to_owned())]
    #[serde(deserialize_with = "text")]
    pub default_image: String,
}

/// Accepts any scalar and keeps its textual form.
///
/// Environment values such as `HPCLOUD_TENANT_ID=10873218563681` reach the
/// deserializer as numbers, but every field using this is an identifier.
struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarTextVisitor).map(Self)
    }
}

struct ScalarTextVisitor;

impl Visitor<'_> for ScalarTextVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string or number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_owned())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    ScalarText::deserialize(deserializer).map(|ScalarText(value)| value)
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ScalarText>::deserialize(deserializer)
        .map(|value| value.map(|ScalarText(inner)| inner))
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(
        description: &'static str,
        env_var: &'static str,
        toml_key: &'static str,
    ) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }
}

const AUTH_TOKEN_FIELD: FieldMetadata =
    FieldMetadata::new("identity auth token", "HPCLOUD_AUTH_TOKEN", "auth_token");
const TENANT_ID_FIELD: FieldMetadata =
    FieldMetadata::new("tenant ID", "HPCLOUD_TENANT_ID", "tenant_id");
const COMPUTE_URL_FIELD: FieldMetadata =
    FieldMetadata::new("compute endpoint", "HPCLOUD_COMPUTE_URL", "compute_url");

impl ComputeConfig {
    fn require_field<'a>(
        value: Option<&'a str>,
        metadata: &FieldMetadata,
    ) -> Result<&'a str, ConfigError> {
        match value.map(str::trim) {
            Some(present) if !present.is_empty() => Ok(present),
            _ => Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to [hpcloud] in hpcloud.toml",
                metadata.description, metadata.env_var, metadata.toml_key
            ))),
        }
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables in that
    /// order of precedence; the binary applies its own flags on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("hpcloud")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Checks that everything needed to send a request is present. Error
    /// messages name the environment variable and configuration key to set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.access().map(|_| ())
    }

    /// Returns the credentials for the compute client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the token, tenant or
    /// endpoint is empty.
    pub fn access(&self) -> Result<Access, ConfigError> {
        let token = Self::require_field(self.auth_token.as_deref(), &AUTH_TOKEN_FIELD)?;
        let tenant = Self::require_field(self.tenant_id.as_deref(), &TENANT_ID_FIELD)?;
        Self::require_field(Some(self.compute_url.as_str()), &COMPUTE_URL_FIELD)?;
        Ok(Access::new(token, tenant))
    }

    /// Resolves the configured default flavor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownFlavor`] when the label is not a known tier.
    pub fn flavor(&self) -> Result<Flavor, ConfigError> {
        Ok(self.default_flavor.parse()?)
    }

    /// Resolves the configured default image.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownImage`] when the value is neither a
    /// number nor a known label.
    pub fn image(&self) -> Result<ImageRef, ConfigError> {
        Ok(self.default_image.parse()?)
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
    /// Raised when the default flavor is not a known tier.
    #[error(transparent)]
    UnknownFlavor(#[from] UnknownFlavor),
    /// Raised when the default image cannot be resolved.
    #[error(transparent)]
    UnknownImage(#[from] UnknownImage),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
