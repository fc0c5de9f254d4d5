mod harness;

use std::sync::Arc;

use harness::{
    harness::{cbid, init_logger, DispatcherHarness},
    transport::{MockTransport, Step},
};
use ocppx_client::{
    CallDispatcher, CallFault, CancellationToken, CsmsOutgoingMessages, FileTransferOutgoing,
    NetworkingNode, SendRequest, UserRoleOutgoing,
};
use ocppx_core::{
    format::{frame::Call, message::CallResponse},
    v16::types::{
        ConfigurationStatus, FileTransferStatus, GenericStatus, ResetStatus, ResetType, UserRole,
    },
    ResultCode,
};
use serde_json::json;

fn node_with(station: &str, steps: Vec<Step>) -> (NetworkingNode<MockTransport>, Arc<CallDispatcher<MockTransport>>) {
    init_logger();
    let node = NetworkingNode::new(cbid("NODE01"));
    let dispatcher = Arc::new(CallDispatcher::new(cbid(station), MockTransport::new(steps)));
    node.add_route(cbid(station), dispatcher.clone());
    (node, dispatcher)
}

fn call(unique_id: &str, action: &str, payload: serde_json::Value) -> Call {
    Call {
        unique_id: unique_id.into(),
        action: action.into(),
        payload,
    }
}

#[tokio::test]
async fn body_address_picks_the_route_and_keeps_the_unique_id() {
    let (node, dispatcher) = node_with("CP002", vec![Step::result(json!({ "status": "Accepted", "extra": 1 }))]);

    let unique_id = uuid::Uuid::new_v4().to_string();
    let inbound = call(&unique_id, "Reset", json!({ "type": "Hard", "chargeBoxId": "cp002" }));
    let reply = node.forward(&cbid("NODE01"), inbound, CancellationToken::new()).await;

    match reply {
        CallResponse::CallResult(result) => {
            assert_eq!(result.unique_id, unique_id);
            assert_eq!(result.payload, json!({ "status": "Accepted", "extra": 1 }));
        }
        CallResponse::CallError(e) => panic!("unexpected error {e:?}"),
    }
    let sent = dispatcher.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].unique_id.as_str(), unique_id);
    assert_eq!(sent[0].action, "Reset");
    assert_eq!(sent[0].payload, json!({ "type": "Hard", "chargeBoxId": "cp002" }));
}

#[tokio::test]
async fn connection_identity_is_used_without_body_address() {
    let (node, dispatcher) = node_with("CP002", vec![Step::result(json!({ "status": "Accepted" }))]);

    let inbound = call("csms-1", "Reset", json!({ "type": "Soft" }));
    let reply = node.forward(&cbid("CP002"), inbound, CancellationToken::new()).await;

    assert!(matches!(reply, CallResponse::CallResult(_)));
    assert_eq!(dispatcher.transport().attempts(), 1);
}

#[tokio::test]
async fn unknown_station_is_a_generic_error() {
    let (node, dispatcher) = node_with("CP002", vec![]);

    let inbound = call("csms-2", "Reset", json!({ "type": "Soft", "chargeBoxId": "CP404" }));
    match node.forward(&cbid("NODE01"), inbound, CancellationToken::new()).await {
        CallResponse::CallError(e) => {
            assert_eq!(e.unique_id, "csms-2");
            assert_eq!(e.error_code, "GenericError");
            assert!(e.error_description.contains("CP404"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(dispatcher.transport().attempts(), 0);
}

#[tokio::test]
async fn remote_error_code_survives_the_hop() {
    let fault = CallFault::new("NotSupported", "no such connector").with_details(json!({ "connector": 9 }));
    let (node, _) = node_with("CP002", vec![Step::fault(fault)]);

    let inbound = call("csms-3", "ChangeAvailability", json!({ "connectorId": 9, "type": "Operative" }));
    match node.forward(&cbid("CP002"), inbound, CancellationToken::new()).await {
        CallResponse::CallError(e) => {
            assert_eq!(e.error_code, "NotSupported");
            assert_eq!(e.error_description, "no such connector");
            assert_eq!(e.error_details, json!({ "connector": 9 }));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn unknown_remote_error_code_becomes_generic_error() {
    let fault = CallFault::new("VendorOops", "firmware said no");
    let (node, _) = node_with("CP002", vec![Step::fault(fault)]);

    let inbound = call("csms-4", "Reset", json!({ "type": "Hard" }));
    match node.forward(&cbid("CP002"), inbound, CancellationToken::new()).await {
        CallResponse::CallError(e) => {
            assert_eq!(e.unique_id, "csms-4");
            assert_eq!(e.error_code, "GenericError");
            assert!(e.error_description.contains("firmware said no"), "{}", e.error_description);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn hop_failures_map_to_generic_and_internal_errors() {
    let (node, _) = node_with(
        "CP002",
        vec![Step::error(ocppx_client::TransportError::Offline), Step::Panic("relay bug")],
    );

    let reply = node
        .forward(&cbid("CP002"), call("a", "Heartbeat", json!({})), CancellationToken::new())
        .await;
    assert!(matches!(reply, CallResponse::CallError(ref e) if e.error_code == "GenericError"));

    let reply = node
        .forward(&cbid("CP002"), call("b", "Heartbeat", json!({})), CancellationToken::new())
        .await;
    assert!(matches!(reply, CallResponse::CallError(ref e) if e.error_code == "InternalError"));
}

#[tokio::test]
async fn node_sends_typed_requests_through_its_routes() {
    let (node, dispatcher) = node_with(
        "CP002",
        vec![
            Step::result(json!({ "status": "Accepted" })),
            Step::result(json!({ "fileName": "log.txt", "status": "Accepted" })),
        ],
    );

    let response = node.reset(&cbid("CP002"), ResetType::Hard, CancellationToken::new()).await;
    assert_eq!(response.payload().unwrap().status, ResetStatus::Accepted);

    let response = node.delete_file(&cbid("CP002"), "log.txt".into(), CancellationToken::new()).await;
    assert_eq!(response.payload().unwrap().status, FileTransferStatus::Accepted);

    let sent = dispatcher.transport().sent();
    assert_eq!(sent[0].action, "Reset");
    assert_eq!(sent[1].action, "DeleteFile");
    assert_eq!(sent[1].payload, json!({ "fileName": "log.txt" }));
}

#[tokio::test]
async fn node_without_route_answers_with_server_failure() {
    let (node, dispatcher) = node_with("CP002", vec![]);

    let request = node.request_for(&cbid("CP999"), ocppx_core::v16::messages::HeartbeatRequest {});
    let response = node.send_request(request, CancellationToken::new()).await;

    assert_eq!(response.result(), ResultCode::Server);
    assert!(response.failure_info().unwrap().description.contains("CP999"));
    assert_eq!(response.request.charge_box_id.as_str(), "CP999");
    assert_eq!(dispatcher.transport().attempts(), 0);
}

#[tokio::test]
async fn removed_route_is_no_longer_used() {
    let (node, _) = node_with("CP002", vec![]);
    assert!(node.remove_route(&cbid("cp002")).is_some());
    assert!(node.route(&cbid("CP002")).is_none());
}

#[tokio::test]
async fn dispatcher_implements_the_outgoing_traits() {
    let h = DispatcherHarness::new(
        "CP001",
        MockTransport::new(vec![
            Step::result(json!({ "status": "RebootRequired" })),
            Step::result(json!({ "status": "Accepted" })),
        ]),
    );
    let station = cbid("CP001");

    let response = h
        .dispatcher
        .change_configuration(&station, "HeartbeatInterval".into(), "60".into(), CancellationToken::new())
        .await;
    assert_eq!(response.payload().unwrap().status, ConfigurationStatus::RebootRequired);

    let role = UserRole {
        id: "operator".into(),
        name: None,
        permissions: ["Reset".to_string()].into_iter().collect(),
    };
    let response = h.dispatcher.add_user_role(&station, role, CancellationToken::new()).await;
    assert_eq!(response.payload().unwrap().status, GenericStatus::Accepted);

    let sent = h.transport.sent();
    assert_eq!(sent[0].payload, json!({ "key": "HeartbeatInterval", "value": "60" }));
    assert_eq!(sent[1].action, "AddUserRole");
    assert_eq!(h.listener.counts(), (2, 2));
}
