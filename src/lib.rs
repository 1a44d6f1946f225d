//! # smsbridge
//!
//! `smsbridge` is the ingestion-and-delivery core for bank transaction text
//! messages. It picks out messages from known bank senders and forwards each
//! one, best-effort, to a consumer process that may or may not be running.
//! A consumer that was away is expected to catch up on its own by rescanning
//! the message store, deduplicating on the `id` this crate attaches.
//!
//! ## Core Modules
//!
//! - `sms`: the raw, classified and wire shapes of a message.
//! - `classifier`: decides whether a sender belongs to a known bank.
//! - `bridge`: the single consumer-link slot and the one-shot delivery attempt.
//! - `ingest`: the per-batch entry point tying classification to delivery.
//! - `consumer`: a channel-backed consumer link.
//! - `transport`: a WebSocket host for the environment and the consumer.
//! - `config`: layered configuration loading.
//! - `utils`: error types and logging setup.

pub mod bridge;
pub mod classifier;
pub mod config;
pub mod consumer;
pub mod ingest;
pub mod sms;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use bridge::{ConsumerLink, DeliveryBridge, DeliveryOutcome, LinkSlot};
pub use classifier::SenderClassifier;
pub use ingest::IngestionCore;
pub use sms::{ClassifiedMessage, RawMessage, SmsPayload};
