//! The `sms` module holds the message shapes that flow through the core.
//!
//! A `RawMessage` is what the environment hands over, a `ClassifiedMessage`
//! is a raw message the classifier accepted, and an `SmsPayload` is the
//! mapping that crosses the boundary to the consumer.

pub mod message;

pub use message::{ClassifiedMessage, RawMessage, SmsPayload};
