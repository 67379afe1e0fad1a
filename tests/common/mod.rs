//! Shared fixtures for textgraph integration tests
//!
//! Payloads are built with `serde_json::json!` in the shape the analysis
//! service returns them.

pub mod payloads;

pub use payloads::{decode, dogs_bark, random_payload, RandomPayload};
