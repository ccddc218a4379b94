use intake_api::HttpExchangeClient;
use intake_chat::{ExchangeOutcome, SessionController, SessionEvent};
use intake_types::{SessionStatus, Turn};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_two_turn_intake_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "머리가 아파요", "history": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": ["언제부터 아프셨나요?"],
            "need_more_info": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({
            "message": "어제 밤부터요",
            "history": [
                { "role": "User", "content": "머리가 아파요" },
                { "role": "System", "content": "언제부터 아프셨나요?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": ["긴장성 두통이 의심됩니다.", "신경과 진료를 권합니다."],
            "need_more_info": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = SessionController::new(HttpExchangeClient::new(server.uri()));

    let first = session.submit("머리가 아파요").await.unwrap();
    assert_eq!(first, ExchangeOutcome::Replied { appended: 1, need_more_info: true });
    assert!(session.need_more_info());

    let second = session.submit("어제 밤부터요").await.unwrap();
    assert_eq!(second, ExchangeOutcome::Replied { appended: 2, need_more_info: false });
    assert!(!session.need_more_info());

    assert_eq!(
        session.conversation(),
        vec![
            Turn::patient("머리가 아파요"),
            Turn::assistant("언제부터 아프셨나요?"),
            Turn::patient("어제 밤부터요"),
            Turn::assistant("긴장성 두통이 의심됩니다."),
            Turn::assistant("신경과 진료를 권합니다."),
        ]
    );
}

#[tokio::test]
async fn test_network_failure_returns_session_to_idle() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = SessionController::new(HttpExchangeClient::new(format!("http://{}", addr)));
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let sink = statuses.clone();
    session.subscribe(move |event| {
        if let SessionEvent::StatusChanged(status) = event {
            sink.lock().unwrap().push(*status);
        }
    });

    let outcome = session.submit("배가 아파요").await.unwrap();

    assert_eq!(outcome, ExchangeOutcome::Failed);
    assert_eq!(session.conversation(), vec![Turn::patient("배가 아파요")]);
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(session.view(true).input_enabled);
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![SessionStatus::AwaitingReply, SessionStatus::Idle]
    );
}

#[tokio::test]
async fn test_server_error_appends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut session = SessionController::new(HttpExchangeClient::new(server.uri()));
    let outcome = session.submit("숨이 차요").await.unwrap();

    assert_eq!(outcome, ExchangeOutcome::Failed);
    assert_eq!(session.store().len(), 1);
}
