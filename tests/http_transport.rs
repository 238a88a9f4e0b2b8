//! Wire-level tests for the HTTP transport against a local mock server.

#[path = "common/test_constants.rs"]
mod test_constants;

use hpcloud::{
    Access, ComputeClient, ComputeError, Flavor, HttpTransport, ImageRef, ServerRequest,
    Transport,
};
use reqwest::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use test_constants::{AUTH_TOKEN, TENANT_ID};

#[fixture]
fn request() -> ServerRequest {
    ServerRequest::builder()
        .flavor(Flavor::Small)
        .image(ImageRef::UBUNTU_LUCID_10_04)
        .name("web1")
        .build()
}

async fn mount_servers(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/v2/{TENANT_ID}/servers")))
        .and(header("X-Auth-Token", AUTH_TOKEN))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "server": {"flavorRef": 101, "imageRef": 1236, "name": "web1"}
        })))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> ComputeClient {
    ComputeClient::new(Access::new(AUTH_TOKEN, TENANT_ID))
        .compute_url(format!("{}/v2/", server.uri()))
}

#[rstest]
#[tokio::test]
async fn accepted_request_carries_headers_and_body(request: ServerRequest) {
    let server = MockServer::start().await;
    let reply = r#"{"server":{"id":"5","adminPass":"x"}}"#;
    mount_servers(&server, 202, reply).await;

    let response = client(&server)
        .create_server(&request)
        .await
        .unwrap_or_else(|err| panic!("creation should succeed: {err}"));

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body, reply.as_bytes());
}

#[rstest]
#[tokio::test]
async fn rejected_request_surfaces_status_and_body(request: ServerRequest) {
    let server = MockServer::start().await;
    let reply = r#"{"badRequest":{"message":"Invalid flavorRef provided.","code":400}}"#;
    mount_servers(&server, 400, reply).await;

    let result = client(&server).create_server(&request).await;

    assert_eq!(
        result,
        Err(ComputeError::Provider {
            status: StatusCode::BAD_REQUEST,
            body: reply.as_bytes().to_vec(),
        })
    );
}

#[tokio::test]
async fn transport_returns_non_success_responses_unmodified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/raw"))
        .and(header("X-Auth-Token", "tok"))
        .respond_with(ResponseTemplate::new(503).set_body_bytes(vec![0xff_u8, b'!']))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/raw", server.uri());
    let response = HttpTransport::new()
        .post_json(&url, "tok", b"{}".to_vec())
        .await
        .unwrap_or_else(|err| panic!("a 503 is still a response: {err}"));

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body, vec![0xff_u8, b'!']);
}
