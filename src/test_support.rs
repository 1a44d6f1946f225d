//! Consumer link doubles shared by unit tests.

use std::sync::Mutex;

use crate::bridge::ConsumerLink;
use crate::sms::SmsPayload;
use crate::utils::error::LinkError;

/// Records every payload it is handed.
#[derive(Debug, Default)]
pub struct RecordingLink {
    pub id: String,
    pub received: Mutex<Vec<SmsPayload>>,
}

impl RecordingLink {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<SmsPayload> {
        self.received.lock().unwrap().clone()
    }
}

impl ConsumerLink for RecordingLink {
    fn id(&self) -> &str {
        &self.id
    }

    fn forward(&self, payload: &SmsPayload) -> Result<(), LinkError> {
        self.received.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Fails every forward with a receiver-side rejection.
#[derive(Debug)]
pub struct RejectingLink;

impl ConsumerLink for RejectingLink {
    fn id(&self) -> &str {
        "rejecting"
    }

    fn forward(&self, _payload: &SmsPayload) -> Result<(), LinkError> {
        Err(LinkError::Rejected("receiver threw".into()))
    }
}

/// Reports the consumer as gone.
#[derive(Debug)]
pub struct ClosedLink;

impl ConsumerLink for ClosedLink {
    fn id(&self) -> &str {
        "closed"
    }

    fn forward(&self, _payload: &SmsPayload) -> Result<(), LinkError> {
        Err(LinkError::Closed)
    }
}

/// Panics on every forward.
#[derive(Debug)]
pub struct PanickingLink;

impl ConsumerLink for PanickingLink {
    fn id(&self) -> &str {
        "panicking"
    }

    fn forward(&self, _payload: &SmsPayload) -> Result<(), LinkError> {
        panic!("consumer exploded");
    }
}
