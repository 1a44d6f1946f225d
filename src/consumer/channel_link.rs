//! Channel-backed consumer link
//!
//! `ChannelLink` holds the sending side of a per-session channel. The
//! transport drains the receiving side onto the socket, so `forward` only
//! enqueues and never waits on the network. Once the session's receiver is
//! dropped every forward reports `LinkError::Closed`.

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::bridge::ConsumerLink;
use crate::sms::SmsPayload;
use crate::transport::message::ServerMessage;
use crate::utils::error::LinkError;

#[derive(Debug, Clone)]
pub struct ChannelLink {
    pub id: String,
    pub sender: UnboundedSender<WsMessage>,
}

impl ChannelLink {
    /// Create a new link with a fresh `consumer-<uuid>` id.
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: format!("consumer-{}", Uuid::new_v4()),
            sender,
        }
    }
}

impl ConsumerLink for ChannelLink {
    fn id(&self) -> &str {
        &self.id
    }

    fn forward(&self, payload: &SmsPayload) -> Result<(), LinkError> {
        let text = serde_json::to_string(&ServerMessage::SmsReceived(payload.clone()))?;
        self.sender
            .send(WsMessage::text(text))
            .map_err(|_| LinkError::Closed)
    }
}
