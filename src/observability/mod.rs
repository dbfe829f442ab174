//! Observability subsystem: logging, metrics, and diagnostic sinks.

pub mod diagnostics;
pub mod logging;
pub mod metrics;
