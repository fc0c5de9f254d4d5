mod harness;

use std::{sync::Arc, time::Duration};

use harness::{
    harness::{cbid, init_logger},
    ws::MockPeer,
};
use ocppx_client::{CallDispatcher, CallPolicy, CancellationToken, TransportError, WebsocketTransport};
use ocppx_core::{
    v16::{
        messages::{HeartbeatRequest, ResetRequest},
        types::{ResetStatus, ResetType},
    },
    ResultCode,
};
use serde_json::json;

fn dispatcher(peer: &MockPeer) -> Arc<CallDispatcher<WebsocketTransport>> {
    init_logger();
    Arc::new(CallDispatcher::with_shared_transport(cbid("CP001"), peer.transport.clone()))
}

#[tokio::test]
async fn result_is_matched_by_unique_id() {
    let peer = MockPeer::new(CallPolicy::Queue);
    let dispatcher = dispatcher(&peer);

    let request = dispatcher.new_request(ResetRequest { kind: ResetType::Soft });
    let request_id = request.request_id().to_string();
    let task = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send(request, CancellationToken::new()).await })
    };

    let call = peer.next_call().await;
    assert_eq!(call.unique_id, request_id);
    assert_eq!(call.action, "Reset");
    assert_eq!(call.payload, json!({ "type": "Soft" }));

    // a stale answer must not complete the call
    assert!(peer.inject(r#"[3,"someone-else",{"status":"Rejected"}]"#).is_none());
    peer.reply(&call, json!({ "status": "Accepted" }));

    let response = task.await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.payload().unwrap().status, ResetStatus::Accepted);
}

#[tokio::test]
async fn call_error_becomes_format_failure() {
    let peer = MockPeer::new(CallPolicy::Queue);
    let dispatcher = dispatcher(&peer);

    let request = dispatcher.new_request(ResetRequest { kind: ResetType::Hard });
    let task = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send(request, CancellationToken::new()).await })
    };
    let call = peer.next_call().await;
    peer.reply_error(&call, "NotSupported", "hard reset disabled");

    let response = task.await.unwrap();
    assert_eq!(response.result(), ResultCode::Format);
    let failure = response.failure_info().unwrap();
    assert!(failure.description.starts_with("NotSupported: "), "{}", failure.description);
    assert_eq!(failure.details.as_ref().unwrap()["errorCode"], "NotSupported");
    assert_eq!(failure.details.as_ref().unwrap()["errorDescription"], "hard reset disabled");
}

#[tokio::test]
async fn overlapping_call_is_rejected_under_reject_policy() {
    let peer = MockPeer::new(CallPolicy::Reject);
    let dispatcher = dispatcher(&peer);

    let first = dispatcher.new_request(HeartbeatRequest {});
    let task = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send(first, CancellationToken::new()).await })
    };
    let call = peer.next_call().await;

    let second = dispatcher.new_request(HeartbeatRequest {});
    let response = dispatcher.send(second, CancellationToken::new()).await;
    assert_eq!(response.result(), ResultCode::Server);
    assert_eq!(
        response.failure_info().unwrap().description,
        TransportError::CallPending.to_string()
    );

    peer.reply(&call, json!({ "currentTime": "2025-03-01T10:00:00Z" }));
    assert!(task.await.unwrap().is_success());
}

#[tokio::test]
async fn overlapping_call_waits_under_queue_policy() {
    let peer = MockPeer::new(CallPolicy::Queue);
    let dispatcher = dispatcher(&peer);

    let first = dispatcher.new_request(ResetRequest { kind: ResetType::Soft });
    let second = dispatcher.new_request(ResetRequest { kind: ResetType::Hard });
    let first_task = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send(first, CancellationToken::new()).await })
    };
    let call = peer.next_call().await;
    let second_task = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send(second, CancellationToken::new()).await })
    };

    // nothing goes out while the first call is pending
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(call.payload["type"], "Soft");
    peer.reply(&call, json!({ "status": "Accepted" }));
    assert!(first_task.await.unwrap().is_success());

    let call = peer.next_call().await;
    assert_eq!(call.payload["type"], "Hard");
    peer.reply(&call, json!({ "status": "Rejected" }));
    let response = second_task.await.unwrap();
    assert_eq!(response.payload().unwrap().status, ResetStatus::Rejected);
}

#[tokio::test]
async fn disconnect_fails_the_pending_call() {
    let peer = MockPeer::new(CallPolicy::Queue);
    let dispatcher = dispatcher(&peer);

    let request = dispatcher.new_request(HeartbeatRequest {});
    let task = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send(request, CancellationToken::new()).await })
    };
    let _call = peer.next_call().await;
    peer.transport.on_disconnect();

    let response = task.await.unwrap();
    assert_eq!(response.result(), ResultCode::Server);
    assert_eq!(
        response.failure_info().unwrap().description,
        TransportError::Offline.to_string()
    );

    let request = dispatcher.new_request(HeartbeatRequest {});
    let response = dispatcher.send(request, CancellationToken::new()).await;
    assert_eq!(response.result(), ResultCode::Server);
}

#[tokio::test]
async fn unanswered_call_times_out_and_frees_the_connection() {
    let peer = MockPeer::new(CallPolicy::Reject);
    let dispatcher = dispatcher(&peer);

    let request = dispatcher
        .new_request(HeartbeatRequest {})
        .with_timeout(Duration::from_millis(50));
    let response = dispatcher.send(request, CancellationToken::new()).await;
    assert_eq!(response.result(), ResultCode::Timeout);
    let stale = peer.next_call().await;

    let request = dispatcher.new_request(ResetRequest { kind: ResetType::Soft });
    let task = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send(request, CancellationToken::new()).await })
    };
    let call = peer.next_call().await;
    peer.reply(&stale, json!({ "currentTime": "2025-03-01T10:00:00Z" }));
    peer.reply(&call, json!({ "status": "Accepted" }));
    assert!(task.await.unwrap().is_success());
}

#[tokio::test]
async fn inbound_call_is_handed_to_the_owner() {
    let peer = MockPeer::new(CallPolicy::Queue);
    init_logger();

    let call = peer
        .inject(r#"[2,"srv-1","Reset",{"type":"Hard"}]"#)
        .expect("CALL not surfaced");
    assert_eq!(call.unique_id, "srv-1");
    assert_eq!(call.action, "Reset");

    assert!(peer.inject("not json").is_none());
    peer.transport
        .send_frame(r#"[3,"srv-1",{"status":"Accepted"}]"#.to_string())
        .unwrap();
    assert_eq!(peer.next_frame().await, r#"[3,"srv-1",{"status":"Accepted"}]"#);
}

#[tokio::test]
async fn nothing_is_sent_before_connect() {
    init_logger();
    let (transport, outbound) = WebsocketTransport::new(CallPolicy::Queue);
    let dispatcher = CallDispatcher::new(cbid("CP001"), transport);
    assert!(!dispatcher.transport().is_connected());

    let request = dispatcher.new_request(HeartbeatRequest {});
    let response = dispatcher.send(request, CancellationToken::new()).await;
    assert_eq!(response.result(), ResultCode::Server);
    assert!(outbound.is_empty());
}
