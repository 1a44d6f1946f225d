//! The `transport` module hosts the core behind a WebSocket endpoint.
//!
//! It stands in for the platform message channel: an environment adapter
//! connects and pushes message batches, and the consumer process connects
//! and registers itself as the delivery target. Frames are JSON, tagged by
//! `type`; see `message` for the protocol.

pub mod message;
pub mod websocket;

#[cfg(test)]
mod websocket_tests;
