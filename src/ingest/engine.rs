use std::sync::Arc;

use tracing::debug;

use crate::bridge::{DeliveryBridge, DeliveryOutcome, LinkSlot};
use crate::classifier::SenderClassifier;
use crate::sms::{ClassifiedMessage, RawMessage};

/// Classifies each inbound message and hands the accepted ones to the
/// delivery bridge.
///
/// `on_messages_received` may be called concurrently from several threads,
/// and concurrently with link registration on the shared `LinkSlot`.
#[derive(Debug, Clone)]
pub struct IngestionCore {
    classifier: SenderClassifier,
    bridge: DeliveryBridge,
}

impl IngestionCore {
    pub fn new(classifier: SenderClassifier, bridge: DeliveryBridge) -> Self {
        Self { classifier, bridge }
    }

    /// Builds a core with its own empty link slot.
    pub fn with_classifier(classifier: SenderClassifier) -> Self {
        Self::new(classifier, DeliveryBridge::new(Arc::new(LinkSlot::new())))
    }

    pub fn classifier(&self) -> &SenderClassifier {
        &self.classifier
    }

    pub fn bridge(&self) -> &DeliveryBridge {
        &self.bridge
    }

    pub fn links(&self) -> &Arc<LinkSlot> {
        self.bridge.links()
    }

    /// Processes one environment batch, in order.
    ///
    /// Rejected messages are dropped. Each accepted message gets exactly one
    /// delivery attempt, whatever happened to the messages before it.
    /// Outcomes are not reported back to the caller.
    pub fn on_messages_received<I>(&self, batch: I)
    where
        I: IntoIterator<Item = RawMessage>,
    {
        let mut accepted = 0usize;
        let mut delivered = 0usize;
        let mut total = 0usize;

        for raw in batch {
            total += 1;
            if !self.classifier.classify(&raw) {
                debug!("Ignoring message from non-bank sender");
                continue;
            }

            accepted += 1;
            debug!("Received bank SMS from: {}", raw.sender);
            let msg = ClassifiedMessage::new(raw);
            if let DeliveryOutcome::Delivered = self.bridge.deliver(&msg) {
                delivered += 1;
            }
        }

        debug!("Batch processed: {total} received, {accepted} accepted, {delivered} delivered");
    }
}
