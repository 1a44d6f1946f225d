use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bridge::link::LinkSlot;
use crate::sms::ClassifiedMessage;
use crate::utils::error::LinkError;

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The link accepted the payload.
    Delivered,
    /// No consumer is registered. Expected while the consumer is not running.
    NoConsumer,
    /// The link faulted; the reason is the fault's description.
    DeliveryFailed(String),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// Best-effort, single-attempt delivery to the registered consumer.
#[derive(Debug, Clone, Default)]
pub struct DeliveryBridge {
    links: Arc<LinkSlot>,
}

impl DeliveryBridge {
    pub fn new(links: Arc<LinkSlot>) -> Self {
        Self { links }
    }

    /// The slot this bridge reads; registration code writes to the same slot.
    pub fn links(&self) -> &Arc<LinkSlot> {
        &self.links
    }

    /// Attempts to forward `msg` to the current consumer link.
    ///
    /// Never blocks on the consumer and never panics outward. A link that
    /// reports `Closed` is dropped from the slot unless it was already
    /// replaced.
    pub fn deliver(&self, msg: &ClassifiedMessage) -> DeliveryOutcome {
        let Some(link) = self.links.snapshot() else {
            info!(
                "No consumer registered, {} left for catch-up sync",
                msg.dedupe_key()
            );
            return DeliveryOutcome::NoConsumer;
        };

        let payload = msg.to_payload();
        let result = panic::catch_unwind(AssertUnwindSafe(|| link.forward(&payload)))
            .unwrap_or(Err(LinkError::Panicked));

        match result {
            Ok(()) => {
                debug!("Delivered {} via link {}", msg.dedupe_key(), link.id());
                DeliveryOutcome::Delivered
            }
            Err(err) => {
                warn!(
                    "Delivery of {} via link {} failed: {err}",
                    msg.dedupe_key(),
                    link.id()
                );
                if matches!(err, LinkError::Closed) && self.links.clear_if_same(&link) {
                    info!("Dropped stale consumer link {}", link.id());
                }
                DeliveryOutcome::DeliveryFailed(err.to_string())
            }
        }
    }
}
