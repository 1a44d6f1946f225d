use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::classifier::SenderClassifier;
use crate::ingest::IngestionCore;
use crate::transport::message::ServerMessage;
use crate::transport::websocket::serve;

type Ws = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn setup_server() -> (String, Arc<IngestionCore>) {
    let core = Arc::new(IngestionCore::with_classifier(SenderClassifier::default()));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(serve(listener, core.clone()));
    (format!("ws://{addr}"), core)
}

async fn connect(url: &str) -> Ws {
    let (ws, _) = connect_async(url).await.expect("WebSocket handshake failed");
    ws
}

async fn send_json(ws: &mut Ws, value: serde_json::Value) {
    ws.send(WsMessage::text(value.to_string()))
        .await
        .expect("Failed to send");
}

async fn recv(ws: &mut Ws) -> ServerMessage {
    let msg = timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("Timed out waiting for server message")
        .expect("Stream ended")
        .expect("WebSocket error");
    let raw_data = msg.into_data();
    serde_json::from_slice(&raw_data).unwrap_or_else(|e| {
        panic!("Failed to deserialize ServerMessage from '{raw_data:?}': {e}");
    })
}

async fn register(ws: &mut Ws) -> String {
    send_json(ws, json!({ "type": "register" })).await;
    match recv(ws).await {
        ServerMessage::Registered { link_id } => link_id,
        other => panic!("Expected Registered, got {other:?}"),
    }
}

fn mixed_batch() -> serde_json::Value {
    json!({
        "type": "ingest",
        "messages": [
            { "sender": "VM-HDFCBK", "body": "Rs 500 debited", "timestamp": 1000 },
            { "sender": "+919812345678", "body": "call me", "timestamp": 1001 },
            { "sender": "AD-AXISBN", "body": "INR 75 credited", "timestamp": 1002 }
        ]
    })
}

#[tokio::test]
async fn test_batch_reaches_registered_consumer() {
    let (url, core) = setup_server().await;
    let mut consumer = connect(&url).await;
    let link_id = register(&mut consumer).await;
    assert!(link_id.starts_with("consumer-"));
    assert!(core.links().is_registered());

    let mut environment = connect(&url).await;
    send_json(&mut environment, mixed_batch()).await;

    match recv(&mut consumer).await {
        ServerMessage::SmsReceived(payload) => {
            assert_eq!(payload.sender, "VM-HDFCBK");
            assert_eq!(payload.body, "Rs 500 debited");
            assert_eq!(payload.timestamp, 1000);
            assert_eq!(payload.id, "VM-HDFCBK_1000");
        }
        other => panic!("Expected SmsReceived, got {other:?}"),
    }
    match recv(&mut consumer).await {
        ServerMessage::SmsReceived(payload) => {
            assert_eq!(payload.sender, "AD-AXISBN");
            assert_eq!(payload.id, "AD-AXISBN_1002");
        }
        other => panic!("Expected SmsReceived, got {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_without_consumer_is_dropped() {
    let (url, core) = setup_server().await;
    let mut environment = connect(&url).await;
    send_json(&mut environment, mixed_batch()).await;

    // Frames on one session are handled in order, so once the error reply
    // arrives the batch has been processed.
    send_json(&mut environment, json!({ "type": "bogus" })).await;
    assert!(matches!(
        recv(&mut environment).await,
        ServerMessage::Error { .. }
    ));
    assert!(!core.links().is_registered());

    let mut consumer = connect(&url).await;
    register(&mut consumer).await;
    let nothing = timeout(Duration::from_millis(200), consumer.next()).await;
    assert!(nothing.is_err(), "No message should be replayed");
}

#[tokio::test]
async fn test_missing_timestamp_uses_server_clock() {
    let (url, _core) = setup_server().await;
    let mut consumer = connect(&url).await;
    register(&mut consumer).await;

    let before = chrono::Utc::now().timestamp_millis();
    let mut environment = connect(&url).await;
    send_json(
        &mut environment,
        json!({ "type": "ingest", "messages": [{ "sender": "HDFCBK", "body": "hi" }] }),
    )
    .await;

    match recv(&mut consumer).await {
        ServerMessage::SmsReceived(payload) => {
            assert!(payload.timestamp >= before);
            assert_eq!(payload.id, format!("HDFCBK_{}", payload.timestamp));
        }
        other => panic!("Expected SmsReceived, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_message_gets_error() {
    let (url, _core) = setup_server().await;
    let mut ws = connect(&url).await;
    ws.send(WsMessage::text("not json".to_string())).await.unwrap();

    match recv(&mut ws).await {
        ServerMessage::Error { message } => assert!(message.starts_with("invalid message")),
        other => panic!("Expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_newer_consumer_replaces_older() {
    let (url, core) = setup_server().await;
    let mut first = connect(&url).await;
    register(&mut first).await;
    let mut second = connect(&url).await;
    let second_id = register(&mut second).await;
    assert_eq!(core.links().snapshot().unwrap().id(), second_id);

    // The first consumer leaving must not clear the second's link.
    first.close(None).await.expect("Failed to close WebSocket");
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(core.links().is_registered());

    let mut environment = connect(&url).await;
    send_json(&mut environment, mixed_batch()).await;
    assert!(matches!(
        recv(&mut second).await,
        ServerMessage::SmsReceived(_)
    ));
}

#[tokio::test]
async fn test_disconnect_clears_link() {
    let (url, core) = setup_server().await;
    let mut consumer = connect(&url).await;
    register(&mut consumer).await;

    consumer.close(None).await.expect("Failed to close WebSocket");

    let mut cleared = false;
    for _ in 0..40 {
        if !core.links().is_registered() {
            cleared = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(cleared, "Consumer link should be cleared after disconnect");
}
