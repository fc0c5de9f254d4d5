use std::{
    collections::{hash_map::DefaultHasher, HashSet},
    hash::{Hash, Hasher},
    time::Duration,
};

use chrono::Utc;
use ocppx_core::{
    format::ResponsePayload,
    v16::{
        messages::{BootNotificationResponse, StatusNotificationRequest},
        types::{ChargePointErrorCode, ChargePointStatus, RegistrationStatus},
    },
    ChargeBoxId, Envelope, EventTrackingId, Failure, Request, RequestId, Response, ResultCode,
};
use serde_json::json;

fn hash_of<T: Hash>(t: &T) -> u64 {
    let mut h = DefaultHasher::new();
    t.hash(&mut h);
    h.finish()
}

fn status(connector_id: usize) -> Request<StatusNotificationRequest> {
    Request::new(
        ChargeBoxId::parse("CP001").unwrap(),
        RequestId::parse("5c7a0b1e").unwrap(),
        StatusNotificationRequest::new(
            connector_id,
            ChargePointStatus::Available,
            ChargePointErrorCode::NoError,
        ),
    )
}

#[test]
fn identical_requests_are_equal_and_hash_alike() {
    let a = status(1);
    std::thread::sleep(Duration::from_millis(2));
    let b = status(1).with_timeout(Duration::from_secs(5));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let set: HashSet<_> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn changing_one_field_breaks_equality() {
    let base = status(1);
    assert_ne!(base, status(2));

    let mut other_status = status(1);
    other_status.payload.status = ChargePointStatus::Charging;
    assert_ne!(base, other_status);

    let other_id = Request::new(
        ChargeBoxId::parse("CP001").unwrap(),
        RequestId::parse("5C7A0B1E").unwrap(),
        base.payload.clone(),
    );
    assert_ne!(base, other_id);

    let other_box = Request::new(
        ChargeBoxId::parse("cp001").unwrap(),
        base.request_id().clone(),
        base.payload.clone(),
    );
    assert_eq!(base, other_box);
}

#[test]
fn event_tracking_id_does_not_take_part_in_equality() {
    let tracked = status(1).with_event_tracking_id(EventTrackingId::parse("trace-1").unwrap());
    assert_eq!(tracked, status(1));
}

#[test]
fn failure_response_falls_back_to_defaults() {
    let envelope = Envelope::new(
        ChargeBoxId::parse("CP001").unwrap(),
        "BootNotification",
        RequestId::parse("1").unwrap(),
    );
    let response = Response::<BootNotificationResponse>::failure(
        &envelope,
        Failure::server("HTTP 500").with_details(json!({ "status": 500 })),
    );
    assert_eq!(response.result(), ResultCode::Server);
    assert!(!response.is_success());
    let payload = response.payload_or_default();
    assert_eq!(payload, BootNotificationResponse::failure_default());
    assert_eq!(payload.status, RegistrationStatus::Rejected);
    assert_eq!(payload.interval, 0);
    assert_eq!(payload.current_time.timestamp(), 0);
    assert_eq!(response.to_json(None)["status"], "Rejected");
}

#[test]
fn responses_compare_by_request_and_outcome() {
    let envelope = Envelope::new(
        ChargeBoxId::parse("CP001").unwrap(),
        "BootNotification",
        RequestId::parse("1").unwrap(),
    );
    let payload = BootNotificationResponse {
        current_time: Utc::now(),
        interval: 300,
        status: RegistrationStatus::Accepted,
    };
    let a = Response::success(&envelope, payload.clone()).with_runtime(Duration::from_millis(3));
    let b = Response::success(&envelope, payload);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, Response::failure(&envelope, Failure::new(ResultCode::Timeout, "timed out")));
}

#[test]
fn display_is_human_readable() {
    let text = status(1).to_string();
    assert!(text.contains("CP001"), "{text}");
    assert!(text.contains("StatusNotification"), "{text}");
    assert!(text.contains("Available"), "{text}");
}
