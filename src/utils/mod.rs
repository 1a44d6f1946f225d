//! The `utils` module provides the shared error types and logging setup
//! used across the `smsbridge` crate.

pub mod error;
pub mod logging;
