//! The `consumer` module provides the consumer link used by the WebSocket
//! host: each registered consumer session is represented by a `ChannelLink`
//! feeding that session's outbound channel.

pub mod channel_link;

pub use channel_link::ChannelLink;
