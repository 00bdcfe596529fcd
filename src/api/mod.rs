//! HTTP API
//!
//! - `services`: catalog and health endpoints
//! - `middleware`: request-id tracing

pub mod middleware;
pub mod services;
