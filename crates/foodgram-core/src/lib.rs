//! Service plumbing shared by Foodgram services.
//!
//! Health probes, request-id propagation, tracing setup, env-driven config,
//! and wire-format serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
