//! HTTP glue around the decision engine.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → server.rs (Axum router, matched path)
//!     → middleware/gate.rs (route name, client IP, method, query)
//!     → RestrictionEngine (governed? denied?)
//!     → 403 or the downstream handler
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
