//! The `classifier` module decides whether an inbound message is a
//! candidate bank notification.
//!
//! Classification looks only at the sender: a message is accepted when its
//! sender contains any configured fragment, ignoring letter case.

pub mod sender;

pub use sender::SenderClassifier;
