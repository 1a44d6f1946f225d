//! The `ingest` module is the entry point the environment calls with each
//! batch of inbound messages.

pub mod engine;

pub use engine::IngestionCore;
