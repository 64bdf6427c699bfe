//! Bundle submission against a local relay that checks signatures the way
//! a real relay does.

use alloy::{
    hex,
    primitives::{keccak256, Address, Bytes, Signature, U256},
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use relay_bundle::{BundleMethod, RequestSigner, SIGNATURE_HEADER};
use relay_client::{RelayClient, RelayError};
use relay_dispatch::{BundleSubmitter, SubmitError};
use relay_test_utils::{
    init_tracing,
    node::MockNode,
    specs::{raw, simple_eip1559, sign_tx},
    users::{TEST_CHAIN_ID, TEST_CONTRACT, TEST_SIGNERS, TEST_USERS},
};
use relay_types::BlockTarget;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Captured {
    header: Option<String>,
    content_type: Option<String>,
    body: Bytes,
}

#[derive(Clone)]
struct MockRelay {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<Captured>>>,
}

async fn handle(
    State(relay): State<MockRelay>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(String::from);
    relay.seen.lock().unwrap().push(Captured {
        header: header(SIGNATURE_HEADER),
        content_type: header("content-type"),
        body: Bytes::from(body.to_vec()),
    });
    (relay.status, Json(relay.reply))
}

/// Start a relay answering every request with `reply`. Returns its URL and
/// the requests it receives.
async fn spawn_relay(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/", post(handle))
        .with_state(MockRelay { status, reply, seen: seen.clone() });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    (format!("http://{addr}/"), seen)
}

/// Recover the signer named in the header from the posted body.
fn recover_header_signer(captured: &Captured) -> Address {
    let header = captured.header.as_deref().expect("signature header");
    let (address, signature) = header.split_once(':').unwrap();
    let signature = Signature::from_raw(&hex::decode(signature).unwrap()).unwrap();

    let message = hex::encode_prefixed(keccak256(&captured.body));
    let recovered = signature.recover_address_from_msg(message).unwrap();
    assert_eq!(address, hex::encode(recovered));
    recovered
}

fn submitter(node: MockNode, url: &str) -> BundleSubmitter<MockNode> {
    BundleSubmitter::new(
        node,
        RequestSigner::new(TEST_SIGNERS[0].clone()),
        RelayClient::new_from_string(url).unwrap(),
    )
}

fn observed_tx(nonce: u64) -> Bytes {
    raw(sign_tx(
        &TEST_SIGNERS[1],
        simple_eip1559(Address::repeat_byte(0x77), U256::ONE, nonce, TEST_CHAIN_ID),
    ))
}

#[tokio::test]
async fn send_bundle_is_signed_and_targeted() {
    init_tracing();
    let (url, seen) = spawn_relay(
        StatusCode::OK,
        json!({"jsonrpc": "2.0", "id": 1, "result": {"bundleHash": "0xabcd"}}),
    )
    .await;

    let node = MockNode::new();
    node.set_head(0x1234);
    let submitter = submitter(node, &url).with_target(BlockTarget::Next);

    let txs = vec![observed_tx(0), observed_tx(1)];
    let response = submitter.send_bundle(txs.clone()).await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.result(), Some(&json!({"bundleHash": "0xabcd"})));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(recover_header_signer(&seen[0]), TEST_USERS[0]);

    let body: Value = serde_json::from_slice(&seen[0].body).unwrap();
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);
    assert_eq!(body["method"], "eth_sendBundle");
    assert_eq!(body["params"][0]["blockNumber"], "0x1235");
    assert_eq!(
        body["params"][0]["txs"],
        json!([hex::encode_prefixed(&txs[0]), hex::encode_prefixed(&txs[1])])
    );
}

#[tokio::test]
async fn head_is_queried_per_submission() {
    let (url, seen) =
        spawn_relay(StatusCode::OK, json!({"jsonrpc": "2.0", "id": 1, "result": null})).await;

    let node = MockNode::new();
    let submitter = submitter(node.clone(), &url);

    node.set_head(100);
    submitter.call_bundle(vec![observed_tx(0)]).await.unwrap();
    node.set_head(101);
    submitter.call_bundle(vec![observed_tx(0)]).await.unwrap();

    let blocks: Vec<Value> = seen
        .lock()
        .unwrap()
        .iter()
        .map(|c| {
            let body: Value = serde_json::from_slice(&c.body).unwrap();
            assert_eq!(body["method"], "eth_callBundle");
            body["params"][0]["blockNumber"].clone()
        })
        .collect();
    assert_eq!(blocks, vec![json!("0x64"), json!("0x65")]);
}

#[tokio::test]
async fn relay_rejection_is_a_response() {
    let (url, _) = spawn_relay(
        StatusCode::OK,
        json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32000, "message": "bundle too late"}}),
    )
    .await;

    let node = MockNode::new();
    let response = submitter(node, &url).call_bundle(vec![observed_tx(0)]).await.unwrap();

    assert!(!response.is_success());
    let error = response.into_result().unwrap_err();
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "bundle too late");
}

#[tokio::test]
async fn mismatched_id_is_malformed() {
    let (url, _) =
        spawn_relay(StatusCode::OK, json!({"jsonrpc": "2.0", "id": 7, "result": true})).await;

    let err = submitter(MockNode::new(), &url).send_bundle(vec![observed_tx(0)]).await.unwrap_err();
    assert!(matches!(err, SubmitError::Relay(RelayError::Malformed(_))));
}

#[tokio::test]
async fn error_status_is_reported_once() {
    let (url, seen) = spawn_relay(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;

    let err = submitter(MockNode::new(), &url).send_bundle(vec![observed_tx(0)]).await.unwrap_err();
    let SubmitError::Relay(err) = err else { panic!("expected a relay error") };
    assert!(matches!(err, RelayError::Network(_)));
    assert_eq!(err.status().map(|status| status.as_u16()), Some(500));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_relay_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = submitter(MockNode::new(), &format!("http://{addr}/"))
        .send_bundle(vec![observed_tx(0)])
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Relay(RelayError::Network(_))));
}

#[tokio::test]
async fn own_transaction_joins_bundle() {
    init_tracing();
    let (url, seen) =
        spawn_relay(StatusCode::OK, json!({"jsonrpc": "2.0", "id": 1, "result": {}})).await;

    let node = MockNode::new();
    node.set_head(50);
    node.set_nonce(TEST_USERS[0], 3);
    let submitter = submitter(node, &url).with_contract(TEST_CONTRACT);

    let own = submitter
        .sign_own_transaction(Bytes::from_static(&[0xca, 0xfe]), 80_000, 1_000_000_000)
        .await
        .unwrap();
    let observed = observed_tx(9);
    submitter
        .submit(BundleMethod::SendBundle, vec![observed.clone(), own.clone()])
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    let body: Value = serde_json::from_slice(&seen[0].body).unwrap();
    assert_eq!(
        body["params"][0]["txs"],
        json!([hex::encode_prefixed(&observed), hex::encode_prefixed(&own)])
    );
    assert_eq!(body["params"][0]["blockNumber"], "0x32");

    let tx = relay_codec::Transaction::decode_raw(&own).unwrap();
    assert_eq!(tx.nonce(), 3);
}
