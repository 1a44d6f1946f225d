//! Error types for `smsbridge`.
//!
//! The ingestion path itself never returns an error: link faults are folded
//! into `DeliveryOutcome::DeliveryFailed` by the bridge. The types here cover
//! what a consumer link may report and what the host binary can fail with.

/// Faults a consumer link can report from a forward attempt.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("consumer link closed")]
    Closed,

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("consumer rejected message: {0}")]
    Rejected(String),

    #[error("consumer link panicked")]
    Panicked,
}

/// WebSocket host errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[from] std::io::Error),
}

/// Top-level error type for the binary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
