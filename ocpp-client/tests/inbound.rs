mod harness;

use std::sync::{Arc, Mutex};

use harness::harness::{cbid, init_logger};
use ocppx_client::{HandlerError, InboundRouter};
use ocppx_core::{
    format::{
        frame::Call,
        message::{CallResponse, OcppMessage},
        ErrorCode,
    },
    v16::{
        messages::{DataTransferRequest, DataTransferResponse, ResetRequest, ResetResponse},
        types::{DataTransferStatus, ResetStatus, ResetType},
    },
    v201, ChargeBoxId,
};
use serde_json::json;

fn router(seen: Arc<Mutex<Vec<(ChargeBoxId, ResetType)>>>) -> InboundRouter {
    init_logger();
    let mut router = InboundRouter::new();
    router
        .on::<ResetRequest, _, _>(move |request| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push((request.charge_box_id().clone(), request.payload.kind));
                Ok(ResetResponse { status: ResetStatus::Accepted })
            }
        })
        .on::<DataTransferRequest, _, _>(|request| async move {
            match request.payload.vendor_string.as_str() {
                "boom" => panic!("vendor handler crashed"),
                "acme" => Ok(DataTransferResponse { status: DataTransferStatus::Accepted, data: None }),
                other => Err(HandlerError::new(ErrorCode::NotSupported, format!("unknown vendor {other}"))),
            }
        });
    router
}

fn call(unique_id: &str, action: &str, payload: serde_json::Value) -> Call {
    Call {
        unique_id: unique_id.into(),
        action: action.into(),
        payload,
    }
}

fn expect_error(response: CallResponse<ErrorCode>) -> (String, ErrorCode, String) {
    match response {
        CallResponse::CallError(e) => (e.unique_id, e.error_code, e.error_description),
        other => panic!("expected CALLERROR, got {other:?}"),
    }
}

#[tokio::test]
async fn handled_action_answers_with_result() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let router = router(seen.clone());
    assert!(router.handles("Reset"));

    let response = router
        .handle_call(&cbid("CP001"), call("u1", "Reset", json!({ "type": "Hard" })))
        .await;
    match response {
        CallResponse::CallResult(result) => {
            assert_eq!(result.unique_id, "u1");
            assert_eq!(result.payload, json!({ "status": "Accepted" }));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(seen.lock().unwrap().as_slice(), &[(cbid("CP001"), ResetType::Hard)]);
}

#[tokio::test]
async fn body_address_reaches_the_handler() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let router = router(seen.clone());

    router
        .handle_call(
            &cbid("NODE01"),
            call("u2", "Reset", json!({ "type": "Soft", "chargeBoxId": "CP007" })),
        )
        .await;
    assert_eq!(seen.lock().unwrap()[0].0.as_str(), "CP007");
}

#[tokio::test]
async fn unknown_action_is_not_implemented() {
    let router = router(Default::default());
    assert!(!router.handles("UnlockConnector"));

    let response = router
        .handle_call(&cbid("CP001"), call("u3", "UnlockConnector", json!({ "connectorId": 1 })))
        .await;
    let (unique_id, code, description) = expect_error(response);
    assert_eq!(unique_id, "u3");
    assert_eq!(code, ErrorCode::NotImplemented);
    assert!(description.contains("UnlockConnector"));
}

#[tokio::test]
async fn bad_payload_is_a_formation_violation() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let router = router(seen.clone());

    let response = router
        .handle_call(&cbid("CP001"), call("u4", "Reset", json!({ "type": "Sideways" })))
        .await;
    let (_, code, _) = expect_error(response);
    assert_eq!(code, ErrorCode::FormationViolation);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn bad_v201_payload_is_a_format_violation() {
    init_logger();
    let mut router = InboundRouter::new();
    router.on::<v201::messages::ResetRequest, _, _>(|_| async move {
        Ok(v201::messages::ResetResponse {
            status: v201::types::ResetStatus::Accepted,
            status_info: None,
        })
    });

    let response = router
        .handle_call(&cbid("CS001"), call("u5", "Reset", json!({ "type": "Later" })))
        .await;
    let (unique_id, code, _) = expect_error(response);
    assert_eq!(unique_id, "u5");
    assert_eq!(code, ErrorCode::FormatViolation);

    let response = router
        .handle_call(&cbid("CS001"), call("u6", "Reset", json!({ "type": "OnIdle", "evseId": 2 })))
        .await;
    assert!(matches!(response, CallResponse::CallResult(_)));
}

#[tokio::test]
async fn handler_errors_and_panics_become_call_errors() {
    let router = router(Default::default());

    let response = router
        .handle_call(&cbid("CP001"), call("u5", "DataTransfer", json!({ "vendorId": "other" })))
        .await;
    let (_, code, description) = expect_error(response);
    assert_eq!(code, ErrorCode::NotSupported);
    assert_eq!(description, "unknown vendor other");

    let response = router
        .handle_call(&cbid("CP001"), call("u6", "DataTransfer", json!({ "vendorId": "boom" })))
        .await;
    let (_, code, description) = expect_error(response);
    assert_eq!(code, ErrorCode::InternalError);
    assert!(description.contains("vendor handler crashed"));

    let response = router
        .handle_call(&cbid("CP001"), call("u7", "DataTransfer", json!({ "vendorId": "acme" })))
        .await;
    assert!(matches!(response, CallResponse::CallResult(_)));
}

#[tokio::test]
async fn raw_frames_get_raw_answers() {
    let router = router(Default::default());
    let connection = cbid("CP001");

    let reply = router
        .handle_frame(&connection, r#"[2,"f1","Reset",{"type":"Soft"}]"#)
        .await
        .unwrap();
    assert_eq!(reply, r#"[3,"f1",{"status":"Accepted"}]"#);

    let reply = router
        .handle_frame(&connection, r#"[2,"f2","Reset","not an object"]"#)
        .await
        .unwrap();
    match OcppMessage::<String>::decode(reply) {
        OcppMessage::CallResponse(CallResponse::CallError(e)) => {
            assert_eq!(e.unique_id, "f2");
            assert_eq!(e.error_code, "FormationViolation");
        }
        other => panic!("unexpected {other:?}"),
    }

    assert!(router.handle_frame(&connection, "{}").await.is_none());
    assert!(router
        .handle_frame(&connection, r#"[3,"f3",{"status":"Accepted"}]"#)
        .await
        .is_none());
}
