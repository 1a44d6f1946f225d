use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_tungstenite::accept_async;
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::consumer::ChannelLink;
use crate::ingest::IngestionCore;
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::utils::error::TransportError;

pub async fn start_websocket_server(
    addr: String,
    core: Arc<IngestionCore>,
) -> Result<(), TransportError> {
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| TransportError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("WebSocket server listening on ws://{addr}");
    serve(listener, core).await
}

/// Accepts connections on an already bound listener until accepting fails.
pub async fn serve(listener: TcpListener, core: Arc<IngestionCore>) -> Result<(), TransportError> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!("Accepted connection from {peer}");
        let core = core.clone();
        spawn(handle_connection(stream, core));
    }
}

async fn handle_connection(stream: TcpStream, core: Arc<IngestionCore>) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake error: {e}");
            return;
        }
    };

    let session_id = format!("session-{}", Uuid::new_v4());
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Outbound channel for this session; a consumer link writes into it too.
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    let session_for_send = session_id.clone();
    spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = ws_sender.send(msg).await {
                warn!("Failed to send message to {session_for_send}: {e}");
                break;
            }
        }
        debug!("Send loop closed for {session_for_send}");
    });

    let mut link_id: Option<String> = None;

    while let Some(Ok(msg)) = ws_receiver.next().await {
        let text = match msg {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => break,
            _ => continue,
        };

        match serde_json::from_str::<ClientMessage>(text.as_str()) {
            Ok(ClientMessage::Register {}) => {
                let link = ChannelLink::new(tx.clone());
                let id = link.id.clone();
                core.links().register(Arc::new(link));
                info!("{session_id} registered as consumer {id}");
                reply(&tx, &ServerMessage::Registered { link_id: id.clone() });
                link_id = Some(id);
            }

            Ok(ClientMessage::Ingest { messages }) => {
                let now = chrono::Utc::now().timestamp_millis();
                debug!("{session_id} pushed a batch of {}", messages.len());
                core.on_messages_received(messages.into_iter().map(|m| m.into_raw(now)));
            }

            Err(err) => {
                warn!("Invalid client message from {session_id}: {err}");
                reply(
                    &tx,
                    &ServerMessage::Error {
                        message: format!("invalid message: {err}"),
                    },
                );
            }
        }
    }

    info!("{session_id} disconnected");

    if let Some(id) = link_id {
        core.links().clear_if_current(&id);
    }
}

fn reply(tx: &UnboundedSender<WsMessage>, msg: &ServerMessage) {
    match serde_json::to_string(msg) {
        Ok(json) => {
            let _ = tx.send(WsMessage::text(json));
        }
        Err(e) => warn!("Failed to serialize reply: {e}"),
    }
}
