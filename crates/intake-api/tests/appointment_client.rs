mod fixtures;

use fixtures::{sample_appointment, IntakeMockServer};
use intake_api::{AppointmentClient, LookupError};
use intake_types::AppointmentStatus;

#[tokio::test]
async fn test_lookup_existing_appointment() {
    let server = IntakeMockServer::new().await;
    server
        .mock_appointment("APT000001", sample_appointment("APT000001"))
        .await;

    let client = AppointmentClient::new(server.uri());
    let appointment = client.lookup("  APT000001 ").await.unwrap();

    assert_eq!(appointment.appointment_id, "APT000001");
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    assert_eq!(appointment.schedule_display(), "10월 27일 오후 3시");
}

#[tokio::test]
async fn test_lookup_unknown_id_is_not_found() {
    let server = IntakeMockServer::new().await;
    server.mock_appointment_status("APT999999", 404).await;

    let client = AppointmentClient::new(server.uri());
    let err = client.lookup("APT999999").await.unwrap_err();

    assert!(matches!(err, LookupError::NotFound(ref id) if id == "APT999999"));
    assert_eq!(
        err.user_message(),
        "예약을 찾을 수 없습니다. 예약번호를 다시 확인해주세요."
    );
}

#[tokio::test]
async fn test_lookup_server_error_is_generic() {
    let server = IntakeMockServer::new().await;
    server.mock_appointment_status("APT000002", 503).await;

    let client = AppointmentClient::new(server.uri());
    let err = client.lookup("APT000002").await.unwrap_err();

    assert!(matches!(err, LookupError::Status(503)));
    assert_eq!(err.user_message(), "예약 조회 중 오류가 발생했습니다.");
}

#[tokio::test]
async fn test_lookup_malformed_record() {
    let server = IntakeMockServer::new().await;
    server
        .mock_appointment("APT000003", serde_json::json!({ "appointment_id": "APT000003" }))
        .await;

    let client = AppointmentClient::new(server.uri());
    let err = client.lookup("APT000003").await.unwrap_err();

    assert!(matches!(err, LookupError::Decode(_)));
}
