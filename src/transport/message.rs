use serde::{Deserialize, Serialize};

use crate::sms::{RawMessage, SmsPayload};

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Makes this session the consumer, replacing any previous one.
    #[serde(rename = "register")]
    Register {},
    /// One environment batch, handed to the ingestion core as-is.
    #[serde(rename = "ingest")]
    Ingest { messages: Vec<InboundSms> },
}

#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "registered")]
    Registered { link_id: String },
    #[serde(rename = "error")]
    Error { message: String },
    #[serde(rename = "sms_received")]
    SmsReceived(SmsPayload),
}

/// A message as pushed by the environment adapter.
///
/// Missing `sender`/`body` become empty strings. A missing `timestamp`
/// falls back to the server clock at arrival.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InboundSms {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl InboundSms {
    pub fn into_raw(self, now_millis: i64) -> RawMessage {
        RawMessage {
            sender: self.sender,
            body: self.body,
            received_at: self.timestamp.unwrap_or(now_millis),
        }
    }
}
