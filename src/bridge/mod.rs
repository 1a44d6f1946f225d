//! The `bridge` module delivers classified messages to the consumer.
//!
//! There is at most one consumer link at a time. It lives in a `LinkSlot`
//! that the registration side writes and the delivery side reads, possibly
//! from different threads. Delivery takes a snapshot of the slot, makes a
//! single attempt on it, and reports the result as a `DeliveryOutcome`.
//! No attempt is retried and no fault escapes the bridge; messages missed
//! here are recovered by the consumer's own catch-up sync.

pub mod engine;
pub mod link;

pub use engine::{DeliveryBridge, DeliveryOutcome};
pub use link::{ConsumerLink, LinkSlot};
