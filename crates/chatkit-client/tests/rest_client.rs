//! RestSessionClient against a wiremock upstream.
//!
//! Verifies the wire contract (path, auth, beta header, body) and that the
//! client reports upstream answers verbatim instead of interpreting them.

use ck_chatkit::{CreateSessionRequest, RestSessionClient, SessionApi};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sends_bearer_beta_header_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chatkit/sessions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("openai-beta", "chatkit_beta=v1"))
        .and(body_json(json!({ "workflow": { "id": "wf_123" }, "user": "visitor-1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "client_secret": "sk_abc", "expires_after": 123 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = RestSessionClient::new(&server.uri(), None).unwrap();
    let reply = client
        .create_session("sk-test", &CreateSessionRequest::new("wf_123", "visitor-1"))
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.client_secret(), Some("sk_abc"));
    assert_eq!(reply.expires_after(), Some(&json!(123)));
}

#[tokio::test]
async fn error_status_is_a_reply_not_an_err() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chatkit/sessions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "bad token" })))
        .mount(&server)
        .await;

    let client = RestSessionClient::new(&server.uri(), None).unwrap();
    let reply = client
        .create_session("sk-wrong", &CreateSessionRequest::new("wf", "u"))
        .await
        .unwrap();

    assert_eq!(reply.status, 401);
    assert!(!reply.is_success());
    assert_eq!(reply.error_message().as_deref(), Some("bad token"));
}

#[tokio::test]
async fn non_json_body_degrades_to_empty_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chatkit/sessions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&server)
        .await;

    let client = RestSessionClient::new(&server.uri(), None).unwrap();
    let reply = client
        .create_session("sk", &CreateSessionRequest::new("wf", "u"))
        .await
        .unwrap();

    assert_eq!(reply.status, 503);
    assert!(reply.payload.is_empty());
}

#[tokio::test]
async fn single_attempt_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chatkit/sessions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestSessionClient::new(&server.uri(), None).unwrap();
    let reply = client
        .create_session("sk", &CreateSessionRequest::new("wf", "u"))
        .await
        .unwrap();
    assert_eq!(reply.status, 500);
}

#[tokio::test]
async fn connection_refused_is_an_err() {
    // Bind then drop a listener so nothing is accepting on the port.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = RestSessionClient::new(&uri, None).unwrap();
    let err = client
        .create_session("sk", &CreateSessionRequest::new("wf", "u"))
        .await
        .unwrap_err();

    assert!(matches!(err, ck_domain::error::Error::Http(_)));
}

#[tokio::test]
async fn timeout_is_an_err() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chatkit/sessions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(500))
                .set_body_json(json!({ "client_secret": "late" })),
        )
        .mount(&server)
        .await;

    let client = RestSessionClient::new(
        &server.uri(),
        Some(std::time::Duration::from_millis(50)),
    )
    .unwrap();
    let result = client
        .create_session("sk", &CreateSessionRequest::new("wf", "u"))
        .await;

    assert!(result.is_err());
}
