//! Behavioural tests for server request validation and JSON encoding.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hpcloud::{
    Flavor, FlavorRef, ImageRef, MAX_PERSONALITY_BYTES, SecurityGroup, ServerRequest,
    ValidationError, serialize,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn web1() -> ServerRequest {
    ServerRequest::builder()
        .flavor(Flavor::Small)
        .image(ImageRef::new(1236))
        .name("web1")
        .build()
}

fn encode_text(request: &ServerRequest) -> String {
    let bytes = serialize(request).unwrap_or_else(|err| panic!("request should encode: {err}"));
    String::from_utf8(bytes).unwrap_or_else(|err| panic!("output should be utf8: {err}"))
}

#[test]
fn every_code_outside_the_range_is_an_invalid_flavor() {
    let outside = (0..100).chain(106..400).chain([u32::MAX]);
    for code in outside {
        let request = ServerRequest {
            flavor: FlavorRef::new(code),
            ..web1()
        };
        assert_eq!(
            serialize(&request),
            Err(ValidationError::InvalidFlavor { code }),
            "code {code} should be rejected"
        );
    }
}

#[test]
fn every_named_flavor_is_accepted() {
    for flavor in Flavor::ALL {
        let request = ServerRequest {
            flavor: flavor.into(),
            ..web1()
        };
        assert!(serialize(&request).is_ok(), "{flavor} should be accepted");
    }
}

#[rstest]
fn zero_image_is_missing_regardless_of_other_fields(web1: ServerRequest) {
    let request = ServerRequest {
        image: ImageRef::new(0),
        key_name: Some(String::from("deploy")),
        config_drive: true,
        personality: Some("p".repeat(MAX_PERSONALITY_BYTES + 10)),
        name: String::new(),
        ..web1
    };
    assert_eq!(serialize(&request), Err(ValidationError::MissingImage));
}

#[rstest]
fn empty_name_is_missing(web1: ServerRequest) {
    let request = ServerRequest {
        name: String::new(),
        ..web1
    };
    assert_eq!(serialize(&request), Err(ValidationError::MissingName));
}

#[rstest]
#[case(MAX_PERSONALITY_BYTES, true)]
#[case(MAX_PERSONALITY_BYTES + 1, false)]
fn personality_limit_is_255_bytes(web1: ServerRequest, #[case] len: usize, #[case] ok: bool) {
    let request = ServerRequest {
        personality: Some("a".repeat(len)),
        ..web1
    };
    let result = serialize(&request);
    if ok {
        assert!(result.is_ok(), "{len} bytes should be accepted");
    } else {
        assert_eq!(result, Err(ValidationError::PersonalityTooLarge { len }));
    }
}

#[rstest]
fn personality_limit_counts_bytes_not_characters(web1: ServerRequest) {
    // 128 two-byte characters are 256 bytes.
    let request = ServerRequest {
        personality: Some("é".repeat(128)),
        ..web1
    };
    assert_eq!(
        serialize(&request),
        Err(ValidationError::PersonalityTooLarge { len: 256 })
    );
}

#[rstest]
fn minimal_request_matches_provider_example(web1: ServerRequest) {
    let text = encode_text(&web1);

    assert!(
        text.contains(r#""flavorRef":101,"imageRef":1236,"name":"web1""#),
        "unexpected payload: {text}"
    );
    for absent in ["key_name", "personality", "metadata"] {
        assert!(!text.contains(absent), "{absent} should be omitted: {text}");
    }
}

#[rstest]
fn metadata_is_encoded_as_an_object(web1: ServerRequest) {
    let request = ServerRequest {
        metadata: BTreeMap::from([(String::from("env"), String::from("prod"))]),
        ..web1
    };
    let text = encode_text(&request);
    assert!(
        text.contains(r#""metadata":{"env":"prod"}"#),
        "unexpected payload: {text}"
    );
}

#[test]
fn fully_populated_request_round_trips_through_a_json_parser() {
    let request = ServerRequest {
        flavor: Flavor::Large.into(),
        image: ImageRef::DEBIAN_SQUEEZE_6_0_3_SERVER,
        name: String::from("db-primary"),
        key_name: Some(String::from("ops")),
        config_drive: true,
        min_count: NonZeroU32::new(1),
        max_count: NonZeroU32::new(3),
        personality: Some(String::from("hostname=db-primary")),
        user_data: Some(String::from("#cloud-config\npackages: [postgresql]\n")),
        security_groups: vec![SecurityGroup::new("db"), SecurityGroup::new("default")],
        metadata: BTreeMap::from([
            (String::from("env"), String::from("prod")),
            (String::from("role"), String::from("primary \"rw\"")),
        ]),
    };

    let bytes = serialize(&request).unwrap_or_else(|err| panic!("request should encode: {err}"));
    let parsed: Value =
        serde_json::from_slice(&bytes).unwrap_or_else(|err| panic!("output should parse: {err}"));
    let server = &parsed["server"];

    assert_eq!(server["flavorRef"], json!(103));
    assert_eq!(server["imageRef"], json!(1361));
    assert_eq!(server["name"], json!("db-primary"));
    assert_eq!(server["key_name"], json!("ops"));
    assert_eq!(server["config_drive"], json!(true));
    assert_eq!(server["min_count"], json!(1));
    assert_eq!(server["max_count"], json!(3));
    assert_eq!(server["personality"], json!("hostname=db-primary"));
    assert_eq!(
        server["security_groups"],
        json!([{"name": "db"}, {"name": "default"}])
    );
    assert_eq!(
        server["metadata"],
        json!({"env": "prod", "role": "primary \"rw\""})
    );

    let encoded = server["user_data"]
        .as_str()
        .unwrap_or_else(|| panic!("user_data should be a string: {server}"));
    let decoded = STANDARD
        .decode(encoded)
        .unwrap_or_else(|err| panic!("user_data should be base64: {err}"));
    assert_eq!(
        String::from_utf8(decoded).ok().as_deref(),
        request.user_data.as_deref()
    );
}
