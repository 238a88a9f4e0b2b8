//! Wire representation of the server creation payload.
//!
//! The provider expects `{"server": {...}}` with camel-cased references and
//! snake-cased optional fields. Optional fields are omitted entirely when the
//! caller left them unset.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use super::{SecurityGroup, ServerRequest};
use crate::flavor::FlavorRef;
use crate::image::ImageRef;

#[derive(Serialize)]
pub(super) struct CreateServerEnvelope<'a> {
    server: CreateServerBody<'a>,
}

#[derive(Serialize)]
struct CreateServerBody<'a> {
    #[serde(rename = "flavorRef")]
    flavor_ref: FlavorRef,
    #[serde(rename = "imageRef")]
    image_ref: ImageRef,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_name: Option<&'a str>,
    #[serde(skip_serializing_if = "is_false")]
    config_drive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_count: Option<NonZeroU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_count: Option<NonZeroU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personality: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_data: Option<String>,
    #[serde(skip_serializing_if = "map_is_empty")]
    metadata: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "groups_are_empty")]
    security_groups: &'a [SecurityGroup],
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde passes skipped fields by reference"
)]
const fn is_false(value: &bool) -> bool {
    !*value
}

fn map_is_empty(value: &&BTreeMap<String, String>) -> bool {
    value.is_empty()
}

const fn groups_are_empty(value: &&[SecurityGroup]) -> bool {
    value.is_empty()
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.is_empty())
}

impl<'a> From<&'a ServerRequest> for CreateServerEnvelope<'a> {
    fn from(request: &'a ServerRequest) -> Self {
        Self {
            server: CreateServerBody {
                flavor_ref: request.flavor,
                image_ref: request.image,
                name: &request.name,
                key_name: non_empty(request.key_name.as_ref()),
                config_drive: request.config_drive,
                min_count: request.min_count,
                max_count: request.max_count,
                personality: non_empty(request.personality.as_ref()),
                user_data: non_empty(request.user_data.as_ref())
                    .map(|payload| STANDARD.encode(payload)),
                metadata: &request.metadata,
                security_groups: &request.security_groups,
            },
        }
    }
}
