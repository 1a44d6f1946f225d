use serde::{Deserialize, Serialize};

/// An inbound text message as delivered by the environment.
///
/// Any field may be empty: a missing originating address arrives as an
/// empty `sender`. `received_at` is milliseconds since the UNIX epoch as
/// reported by the device clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub sender: String,
    pub body: String,
    pub received_at: i64,
}

impl RawMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>, received_at: i64) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            received_at,
        }
    }
}

/// A raw message the classifier accepted, plus the key the consumer uses
/// to ingest it idempotently.
///
/// The key is `"{sender}_{received_at}"`. Two messages from the same sender
/// with the same timestamp share a key; the consumer relies on that to
/// collapse a live push and a catch-up rescan of the same message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMessage {
    raw: RawMessage,
    dedupe_key: String,
}

impl ClassifiedMessage {
    pub fn new(raw: RawMessage) -> Self {
        let dedupe_key = dedupe_key(&raw.sender, raw.received_at);
        Self { raw, dedupe_key }
    }

    pub fn sender(&self) -> &str {
        &self.raw.sender
    }

    pub fn body(&self) -> &str {
        &self.raw.body
    }

    pub fn received_at(&self) -> i64 {
        self.raw.received_at
    }

    pub fn dedupe_key(&self) -> &str {
        &self.dedupe_key
    }

    /// Builds the mapping handed to the consumer.
    pub fn to_payload(&self) -> SmsPayload {
        SmsPayload {
            sender: self.raw.sender.clone(),
            body: self.raw.body.clone(),
            timestamp: self.raw.received_at,
            id: self.dedupe_key.clone(),
        }
    }
}

/// Derives the dedupe key for a sender/timestamp pair.
pub fn dedupe_key(sender: &str, received_at: i64) -> String {
    format!("{sender}_{received_at}")
}

/// The payload forwarded to the consumer.
///
/// # Fields
///
/// - `sender` - originating address, unmodified.
/// - `body` - full message text.
/// - `timestamp` - `received_at` in milliseconds since the UNIX epoch.
/// - `id` - the dedupe key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsPayload {
    pub sender: String,
    pub body: String,
    pub timestamp: i64,
    pub id: String,
}

impl From<&ClassifiedMessage> for SmsPayload {
    fn from(msg: &ClassifiedMessage) -> Self {
        msg.to_payload()
    }
}
