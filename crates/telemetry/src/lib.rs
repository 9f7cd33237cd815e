//! Internal telemetry for the contact service.
//!
//! Structured logging, a health registry for readiness checks and
//! in-process counters reported through `/health`.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
