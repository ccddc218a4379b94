#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock server utilities for testing the intake HTTP clients
pub struct IntakeMockServer {
    server: MockServer,
}

impl IntakeMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Mock a successful chat reply for a request whose body matches `request` exactly
    pub async fn mock_chat_exchange(&self, request: Value, response: Value) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(request))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock any chat request with a fixed status and raw body
    pub async fn mock_chat_raw(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a chat reply that arrives after `delay`
    pub async fn mock_chat_delayed(&self, delay: std::time::Duration) {
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "messages": ["늦은 답변"] }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a stored appointment
    pub async fn mock_appointment(&self, id: &str, record: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/appointments/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(record))
            .mount(&self.server)
            .await;
    }

    /// Mock an appointment lookup answered with `status`
    pub async fn mock_appointment_status(&self, id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/appointments/{}", id)))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "detail": "Appointment not found" })),
            )
            .mount(&self.server)
            .await;
    }
}

pub fn sample_appointment(id: &str) -> Value {
    json!({
        "appointment_id": id,
        "patient_name": "홍길동",
        "department": "신경과",
        "appointment_date": "10월 27일",
        "appointment_time": "15:00",
        "status": "confirmed",
        "created_at": "2025-10-20T09:12:33"
    })
}
