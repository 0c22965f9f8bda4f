use std::time::Duration;

use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wizard_engine::{FailureKind, ReqwestSubmitter, ServerReply, SubmitSettings, Submitter};

fn entries() -> Vec<(String, String)> {
    vec![
        ("name".to_string(), "Ada Lovelace".to_string()),
        ("routing_number".to_string(), "123456789".to_string()),
        ("file".to_string(), "data:image/png;base64,iVBORw0K".to_string()),
    ]
}

#[tokio::test]
async fn success_status_decodes_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register/U1"))
        .and(header("accept", "application/json"))
        .and(body_string_contains("Ada Lovelace"))
        .and(body_string_contains("data:image/png;base64,iVBORw0K"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(SubmitSettings::default());
    let url = format!("{}/register/U1", server.uri());

    let reply = submitter.submit(&url, &entries()).await.expect("submit ok");
    assert_eq!(
        reply,
        ServerReply::Accepted {
            message: "ok".to_string()
        }
    );
}

#[tokio::test]
async fn error_status_decodes_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register/U1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({ "message": "bad" })))
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(SubmitSettings::default());
    let url = format!("{}/register/U1", server.uri());

    let reply = submitter.submit(&url, &entries()).await.expect("reply decoded");
    assert_eq!(
        reply,
        ServerReply::Rejected {
            status: 400,
            message: "bad".to_string()
        }
    );
}

#[tokio::test]
async fn non_json_error_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(SubmitSettings::default());
    let url = format!("{}/register/U1", server.uri());

    let err = submitter.submit(&url, &entries()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse { status: 502 });
}

#[tokio::test]
async fn success_without_message_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(SubmitSettings::default());
    let url = format!("{}/register/U1", server.uri());

    let err = submitter.submit(&url, &entries()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse { status: 200 });
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({ "message": "late" })),
        )
        .mount(&server)
        .await;

    let settings = SubmitSettings {
        request_timeout: Duration::from_millis(50),
        ..SubmitSettings::default()
    };
    let submitter = ReqwestSubmitter::new(settings);
    let url = format!("{}/register/U1", server.uri());

    let err = submitter.submit(&url, &entries()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_reply_is_rejected() {
    let server = MockServer::start().await;
    let long_message = "x".repeat(64);
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": long_message })))
        .mount(&server)
        .await;

    let settings = SubmitSettings {
        max_response_bytes: 16,
        ..SubmitSettings::default()
    };
    let submitter = ReqwestSubmitter::new(settings);
    let url = format!("{}/register/U1", server.uri());

    let err = submitter.submit(&url, &entries()).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 16,
            status: 200
        }
    );
}

#[tokio::test]
async fn invalid_action_fails_before_network() {
    let submitter = ReqwestSubmitter::new(SubmitSettings::default());
    let err = submitter.submit("not a url", &entries()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
